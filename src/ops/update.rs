use crate::core::context::OpContext;
use crate::core::types::HeroId;
use crate::model::{HeroDraft, HeroDto, UpdateHeroRequest};
use crate::ops::error::{OpError, MSG_DUPLICATE_HERO_NAME, MSG_HERO_NOT_FOUND, MSG_STALE_VERSION};
use crate::ops::outcome::OpResult;
use crate::ops::{pipeline, read_back_hero, validate};
use crate::store::{CatalogStore, CatalogTx};

const MSG_UPDATED: &str = "Hero updated successfully.";

/// Updates a hero's fields and reconciles its power links against the
/// requested set. The caller's version token is checked twice: against the
/// snapshot before staging, which rejects obviously stale callers early, and
/// against the live root at commit, which is the authoritative compare.
/// Both misses report the same conflict.
pub async fn update_hero(
    store: &dyn CatalogStore,
    ctx: &OpContext,
    req: UpdateHeroRequest,
) -> OpResult<HeroDto> {
    let draft = match validate::validate_update(&req) {
        Ok(draft) => draft,
        Err(err) => return err.into_result(ctx),
    };

    let staged = pipeline::mutate(
        store,
        ctx,
        "update_hero",
        (req, draft),
        |mut tx, (req, draft)| async move {
            let outcome = stage(tx.as_mut(), req, draft).await;
            (tx, outcome)
        },
    )
    .await;

    match staged {
        Ok(id) => match read_back_hero(store, id).await {
            Ok(dto) => OpResult::ok(dto, MSG_UPDATED),
            Err(err) => err.into_result(ctx),
        },
        Err(err) => err.into_result(ctx),
    }
}

async fn stage(
    tx: &mut dyn CatalogTx,
    req: UpdateHeroRequest,
    draft: HeroDraft,
) -> Result<HeroId, OpError> {
    let persisted = tx
        .hero_by_id(req.id)
        .await?
        .ok_or_else(|| OpError::not_found(MSG_HERO_NOT_FOUND))?;

    // The name check runs before the token compare so a rename onto a taken
    // name reports the name conflict even when the caller is also stale.
    if tx.hero_name_taken(&draft.hero_name, Some(req.id)).await? {
        return Err(OpError::conflict(MSG_DUPLICATE_HERO_NAME));
    }

    if persisted.version != req.version {
        tracing::debug!(hero_id = req.id, "version token mismatch on snapshot");
        return Err(OpError::conflict(MSG_STALE_VERSION));
    }

    tx.update_hero(req.id, draft, &req.power_ids, &req.version)
        .await?;
    Ok(req.id)
}
