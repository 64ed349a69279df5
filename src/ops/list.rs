use crate::core::context::OpContext;
use crate::model::{HeroDto, ListHeroesQuery};
use crate::ops::error::{OpError, MSG_NO_HEROES};
use crate::ops::outcome::{OpResult, PagedResult};
use crate::ops::{pipeline, validate};
use crate::store::{CatalogStore, CatalogTx};

const MSG_LISTED: &str = "Heroes retrieved successfully.";

/// Lists heroes one page at a time, optionally filtered by a case-insensitive
/// substring on name or hero name. An empty catalog (or a filter matching
/// nothing) reports not-found; a page past the end of a non-empty result is
/// an ordinary success with an empty item list.
pub async fn list_heroes(
    store: &dyn CatalogStore,
    ctx: &OpContext,
    query: ListHeroesQuery,
) -> OpResult<PagedResult<HeroDto>> {
    let (page, page_size, search) = validate::normalize_query(&query);

    let outcome = pipeline::query(
        store,
        ctx,
        "list_heroes",
        (page, page_size, search),
        |tx, (page, page_size, search)| async move {
            let outcome = match tx.list_heroes(page, page_size, search.as_deref()).await {
                Ok(slice) if slice.total == 0 => Err(OpError::not_found(MSG_NO_HEROES)),
                Ok(slice) => Ok(PagedResult {
                    items: slice.heroes.into_iter().map(HeroDto::from).collect(),
                    total: slice.total,
                    page,
                    page_size,
                }),
                Err(err) => Err(err.into()),
            };
            (tx, outcome)
        },
    )
    .await;

    match outcome {
        Ok(paged) => OpResult::ok(paged, MSG_LISTED),
        Err(err) => err.into_result(ctx),
    }
}
