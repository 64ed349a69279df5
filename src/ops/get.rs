use crate::core::context::OpContext;
use crate::core::types::HeroId;
use crate::model::HeroDto;
use crate::ops::error::{OpError, MSG_HERO_NOT_FOUND};
use crate::ops::outcome::OpResult;
use crate::ops::{pipeline, validate};
use crate::store::{CatalogStore, CatalogTx};

const MSG_RETRIEVED: &str = "Hero retrieved successfully.";

/// Fetches one hero with its powers attached.
pub async fn get_hero(store: &dyn CatalogStore, ctx: &OpContext, id: HeroId) -> OpResult<HeroDto> {
    if let Err(err) = validate::validate_hero_id(id) {
        return err.into_result(ctx);
    }

    let outcome = pipeline::query(store, ctx, "get_hero", id, |tx, id| async move {
        let outcome = match tx.hero_by_id(id).await {
            Ok(Some(record)) => Ok(HeroDto::from(record)),
            Ok(None) => Err(OpError::not_found(MSG_HERO_NOT_FOUND)),
            Err(err) => Err(err.into()),
        };
        (tx, outcome)
    })
    .await;

    match outcome {
        Ok(dto) => OpResult::ok(dto, MSG_RETRIEVED),
        Err(err) => err.into_result(ctx),
    }
}
