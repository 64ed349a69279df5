// ============================================================================
// Storage Adapter
// ============================================================================
//
// Pluggable persistence seam for the hero catalog. A store hands out
// transactions; a transaction offers snapshot reads and staged writes, and
// turns into committed state only through `commit`. The one capability every
// backend must provide: compare-and-swap of the hero version token at commit,
// so a stale update can never overwrite a newer row.
//
// ============================================================================

pub mod memory;
pub mod seed;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::token::VersionToken;
use crate::core::types::{HeroId, PowerId};
use crate::model::{HeroDraft, HeroRecord, PowerRecord};

pub use memory::MemoryCatalog;

/// One page of heroes plus the total matching count.
#[derive(Debug, Clone)]
pub struct HeroSlice {
    pub heroes: Vec<HeroRecord>,
    pub total: u64,
}

/// Entry point of a storage backend.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Opens a transaction over a stable snapshot of committed state.
    async fn begin(&self) -> Result<Box<dyn CatalogTx>>;
}

/// A single transaction: snapshot reads, staged writes, then commit or
/// rollback. Dropping an uncommitted transaction discards it.
#[async_trait]
pub trait CatalogTx: Send {
    /// Hero with its associations, or `None` if absent from the snapshot.
    async fn hero_by_id(&self, id: HeroId) -> Result<Option<HeroRecord>>;

    /// Ordered-by-id page of heroes matching `search` (case-insensitive
    /// substring on legal or hero name), with the total matching count.
    async fn list_heroes(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<HeroSlice>;

    /// Whether any hero other than `exclude` already holds `hero_name`.
    /// Exact comparison; the authoritative check runs again at commit.
    async fn hero_name_taken(&self, hero_name: &str, exclude: Option<HeroId>) -> Result<bool>;

    /// Full power catalog, ordered by id.
    async fn list_powers(&self) -> Result<Vec<PowerRecord>>;

    /// Stages a new hero with a fresh token and one association per power id
    /// that exists in the catalog; unknown ids are dropped silently.
    async fn insert_hero(&mut self, draft: HeroDraft, power_ids: &[PowerId]) -> Result<HeroRecord>;

    /// Stages scalar changes and the association delta for a hero, guarded by
    /// `expected`: the token read from this transaction's snapshot. Commit
    /// re-checks it against live state and rejects the transaction when it no
    /// longer matches.
    async fn update_hero(
        &mut self,
        id: HeroId,
        draft: HeroDraft,
        desired_power_ids: &[PowerId],
        expected: &VersionToken,
    ) -> Result<HeroRecord>;

    /// Stages removal of a hero and all of its associations.
    async fn delete_hero(&mut self, id: HeroId) -> Result<()>;

    /// Stages a new power catalog entry. Seeding path only.
    async fn insert_power(&mut self, name: &str, description: &str) -> Result<PowerRecord>;

    /// Validates staged writes against live committed state and publishes
    /// them atomically.
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Discards staged writes.
    async fn rollback(self: Box<Self>) -> Result<()>;
}
