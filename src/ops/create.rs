use crate::core::context::OpContext;
use crate::core::types::{HeroId, PowerId};
use crate::model::{CreateHeroRequest, HeroDraft, HeroDto};
use crate::ops::error::{OpError, MSG_DUPLICATE_HERO_NAME};
use crate::ops::outcome::OpResult;
use crate::ops::{pipeline, read_back_hero, validate};
use crate::store::{CatalogStore, CatalogTx};

const MSG_CREATED: &str = "Hero created successfully.";

/// Creates a hero together with its initial power links. Unknown power ids
/// are dropped silently; the hero name must be unused.
pub async fn create_hero(
    store: &dyn CatalogStore,
    ctx: &OpContext,
    req: CreateHeroRequest,
) -> OpResult<HeroDto> {
    let draft = match validate::validate_create(&req) {
        Ok(draft) => draft,
        Err(err) => return err.into_result(ctx),
    };

    let staged = pipeline::mutate(
        store,
        ctx,
        "create_hero",
        (draft, req.power_ids),
        |mut tx, (draft, power_ids)| async move {
            let outcome = stage(tx.as_mut(), draft, power_ids).await;
            (tx, outcome)
        },
    )
    .await;

    match staged {
        Ok(id) => match read_back_hero(store, id).await {
            Ok(dto) => OpResult::created(dto, MSG_CREATED),
            Err(err) => err.into_result(ctx),
        },
        Err(err) => err.into_result(ctx),
    }
}

async fn stage(
    tx: &mut dyn CatalogTx,
    draft: HeroDraft,
    power_ids: Vec<PowerId>,
) -> Result<HeroId, OpError> {
    if tx.hero_name_taken(&draft.hero_name, None).await? {
        return Err(OpError::conflict(MSG_DUPLICATE_HERO_NAME));
    }
    let record = tx.insert_hero(draft, &power_ids).await?;
    tracing::debug!(hero_id = record.id, "hero staged");
    Ok(record.id)
}
