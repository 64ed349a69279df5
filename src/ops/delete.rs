use crate::core::context::OpContext;
use crate::core::types::HeroId;
use crate::ops::error::{OpError, MSG_HERO_NOT_FOUND};
use crate::ops::outcome::OpResult;
use crate::ops::{pipeline, validate};
use crate::store::{CatalogStore, CatalogTx};

const MSG_REMOVED: &str = "Hero removed successfully.";

/// Deletes a hero and its power links. No version token is required; the last
/// observed state wins. A hero that disappears between snapshot and commit
/// reports the usual concurrency conflict.
pub async fn delete_hero(store: &dyn CatalogStore, ctx: &OpContext, id: HeroId) -> OpResult<()> {
    if let Err(err) = validate::validate_hero_id(id) {
        return err.into_result(ctx);
    }

    let outcome = pipeline::mutate(store, ctx, "delete_hero", id, |mut tx, id| async move {
        let outcome = stage(tx.as_mut(), id).await;
        (tx, outcome)
    })
    .await;

    match outcome {
        Ok(()) => OpResult::ok_empty(MSG_REMOVED),
        Err(err) => err.into_result(ctx),
    }
}

async fn stage(tx: &mut dyn CatalogTx, id: HeroId) -> Result<(), OpError> {
    if tx.hero_by_id(id).await?.is_none() {
        return Err(OpError::not_found(MSG_HERO_NOT_FOUND));
    }
    tx.delete_hero(id).await?;
    Ok(())
}
