use crate::core::context::OpContext;
use crate::model::PowerDto;
use crate::ops::outcome::OpResult;
use crate::ops::pipeline;
use crate::store::{CatalogStore, CatalogTx};

const MSG_LISTED: &str = "Superpowers retrieved successfully.";

/// Lists the whole superpower catalog, ordered by id. An empty catalog is a
/// plain success; only hero listings treat emptiness as not-found.
pub async fn list_powers(store: &dyn CatalogStore, ctx: &OpContext) -> OpResult<Vec<PowerDto>> {
    let outcome = pipeline::query(store, ctx, "list_powers", (), |tx, ()| async move {
        let outcome = match tx.list_powers().await {
            Ok(records) => Ok(records.into_iter().map(PowerDto::from).collect::<Vec<_>>()),
            Err(err) => Err(err.into()),
        };
        (tx, outcome)
    })
    .await;

    match outcome {
        Ok(powers) => OpResult::ok(powers, MSG_LISTED),
        Err(err) => err.into_result(ctx),
    }
}
