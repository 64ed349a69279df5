// ============================================================================
// Herodex Library
// ============================================================================

pub mod config;
pub mod core;
pub mod model;
pub mod ops;
pub mod reconcile;
pub mod store;

// Re-export main types for convenience
pub use config::AppConfig;
pub use crate::core::{HeroId, OpContext, PowerId, StoreError, TokenStrategy, VersionToken};
pub use model::{
    CreateHeroRequest, HeroDto, ListHeroesQuery, PowerDto, UpdateHeroRequest,
};
pub use ops::{OpError, OpResult, OpStatus, PagedResult};
pub use reconcile::{reconcile, PowerDelta};
pub use store::{seed, CatalogStore, CatalogTx, MemoryCatalog};

use std::sync::Arc;

// ============================================================================
// High-level Catalog API
// ============================================================================

/// Hero catalog front door.
///
/// Bundles a store with the operation layer so applications deal with plain
/// requests and result envelopes instead of transactions.
///
/// # Examples
///
/// ```
/// use herodex::{CreateHeroRequest, HeroCatalog, OpContext};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let catalog = HeroCatalog::in_memory();
/// let ctx = OpContext::new();
///
/// herodex::seed::seed_powers(catalog.store(), herodex::seed::DEFAULT_POWERS)
///     .await
///     .unwrap();
///
/// let created = catalog
///     .create_hero(&ctx, CreateHeroRequest {
///         name: "Diana Prince".into(),
///         hero_name: "Wonder Woman".into(),
///         birth_date: "1985-03-22".parse().unwrap(),
///         height_m: 1.78,
///         weight_kg: 74.0,
///         power_ids: vec![1, 2],
///     })
///     .await;
/// assert!(created.success);
///
/// let hero = created.data.unwrap();
/// let fetched = catalog.get_hero(&ctx, hero.id).await;
/// assert_eq!(fetched.data.unwrap().hero_name, "Wonder Woman");
/// # }
/// ```
pub struct HeroCatalog {
    store: Arc<dyn CatalogStore>,
}

impl HeroCatalog {
    /// In-memory catalog with the default sequence token strategy.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryCatalog::new()))
    }

    /// In-memory catalog with an explicit token strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use herodex::{HeroCatalog, TokenStrategy};
    ///
    /// let catalog = HeroCatalog::with_strategy(TokenStrategy::Random);
    /// ```
    pub fn with_strategy(strategy: TokenStrategy) -> Self {
        Self::with_store(Arc::new(MemoryCatalog::with_strategy(strategy)))
    }

    /// Wraps an already-built store. Use this to share one store between
    /// several fronts or to plug in a different backend.
    pub fn with_store(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// The underlying store, for seeding and direct transaction work.
    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    /// Creates a hero with its initial power links.
    pub async fn create_hero(
        &self,
        ctx: &OpContext,
        req: CreateHeroRequest,
    ) -> OpResult<HeroDto> {
        ops::create::create_hero(self.store.as_ref(), ctx, req).await
    }

    /// Updates a hero under optimistic concurrency. The request has to carry
    /// the version token from the last read; a stale token is a conflict.
    pub async fn update_hero(
        &self,
        ctx: &OpContext,
        req: UpdateHeroRequest,
    ) -> OpResult<HeroDto> {
        ops::update::update_hero(self.store.as_ref(), ctx, req).await
    }

    /// Deletes a hero and its power links. No token required.
    pub async fn delete_hero(&self, ctx: &OpContext, id: HeroId) -> OpResult<()> {
        ops::delete::delete_hero(self.store.as_ref(), ctx, id).await
    }

    /// Fetches one hero with its powers.
    pub async fn get_hero(&self, ctx: &OpContext, id: HeroId) -> OpResult<HeroDto> {
        ops::get::get_hero(self.store.as_ref(), ctx, id).await
    }

    /// Lists heroes page by page, optionally filtered by a substring on
    /// either name.
    pub async fn list_heroes(
        &self,
        ctx: &OpContext,
        query: ListHeroesQuery,
    ) -> OpResult<PagedResult<HeroDto>> {
        ops::list::list_heroes(self.store.as_ref(), ctx, query).await
    }

    /// Lists the superpower catalog.
    pub async fn list_powers(&self, ctx: &OpContext) -> OpResult<Vec<PowerDto>> {
        ops::powers::list_powers(self.store.as_ref(), ctx).await
    }
}
