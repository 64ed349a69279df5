// ============================================================================
// Catalog Operations
// ============================================================================
//
// Each operation validates its input, runs its body through the shared
// pipeline (snapshot transaction in, commit or rollback out) and folds the
// outcome into a result envelope. Mutations finish by re-reading the hero on
// a fresh snapshot so the payload reflects what was actually committed.

pub mod create;
pub mod delete;
pub mod error;
pub mod get;
pub mod list;
pub mod outcome;
pub mod powers;
pub mod update;

mod pipeline;
mod validate;

pub use error::OpError;
pub use outcome::{OpResult, OpStatus, PagedResult};

use crate::core::types::HeroId;
use crate::model::HeroDto;
use crate::ops::error::MSG_HERO_NOT_FOUND;
use crate::store::{CatalogStore, CatalogTx};

/// Reloads a hero on a fresh snapshot after a successful commit. The row can
/// only be missing if a concurrent delete landed in between; that reads as an
/// ordinary not-found, the same answer a follow-up get would give.
pub(crate) async fn read_back_hero(
    store: &dyn CatalogStore,
    id: HeroId,
) -> Result<HeroDto, OpError> {
    let tx = store.begin().await?;
    let loaded = tx.hero_by_id(id).await;
    if let Err(rollback_err) = tx.rollback().await {
        tracing::warn!(error = %rollback_err, "rollback failed");
    }
    match loaded? {
        Some(record) => Ok(HeroDto::from(record)),
        None => {
            tracing::warn!(hero_id = id, "hero disappeared between commit and read-back");
            Err(OpError::not_found(MSG_HERO_NOT_FOUND))
        }
    }
}
