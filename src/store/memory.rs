// ============================================================================
// In-Memory Catalog Store
// ============================================================================
//
// Committed state lives in persistent (`im`) ordered maps behind one RwLock.
// `begin` clones the root (cheap, structural sharing); a transaction stages
// writes against its own copy and records, per updated hero, the token it
// observed in the snapshot. `commit` takes the write lock, re-validates every
// staged write against the live root (token compare-and-swap, hero-name
// uniqueness), replays the writes onto it and swaps. First committer wins;
// the loser gets a conflict error and the root stays untouched.
//
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use im::{OrdMap, OrdSet};
use tokio::sync::RwLock;

use crate::core::error::{Result, StoreError};
use crate::core::token::{TokenSource, TokenStrategy, VersionToken};
use crate::core::types::{HeroId, PowerId};
use crate::model::{HeroDraft, HeroRecord, PowerRecord};
use crate::reconcile::reconcile;
use crate::store::{CatalogStore, CatalogTx, HeroSlice};

#[derive(Debug, Clone)]
struct HeroRow {
    name: String,
    hero_name: String,
    birth_date: chrono::NaiveDate,
    height_m: f64,
    weight_kg: f64,
    version: VersionToken,
}

#[derive(Debug, Clone)]
struct PowerRow {
    name: String,
    description: String,
}

/// Full catalog state. Cloning is O(1) thanks to structural sharing, which is
/// what makes snapshot-per-transaction affordable.
#[derive(Debug, Clone, Default)]
struct CatalogState {
    heroes: OrdMap<HeroId, HeroRow>,
    powers: OrdMap<PowerId, PowerRow>,
    links: OrdSet<(HeroId, PowerId)>,
}

impl CatalogState {
    fn power_ids_of(&self, id: HeroId) -> Vec<PowerId> {
        self.links
            .iter()
            .filter(|link| link.0 == id)
            .map(|link| link.1)
            .collect()
    }

    fn power_record(&self, id: PowerId) -> Option<PowerRecord> {
        self.powers.get(&id).map(|row| PowerRecord {
            id,
            name: row.name.clone(),
            description: row.description.clone(),
        })
    }

    fn hero_record(&self, id: HeroId) -> Option<HeroRecord> {
        let row = self.heroes.get(&id)?;
        let powers = self
            .power_ids_of(id)
            .into_iter()
            .filter_map(|pid| self.power_record(pid))
            .collect();
        Some(HeroRecord {
            id,
            name: row.name.clone(),
            hero_name: row.hero_name.clone(),
            birth_date: row.birth_date,
            height_m: row.height_m,
            weight_kg: row.weight_kg,
            version: row.version.clone(),
            powers,
        })
    }

    /// Exact-match uniqueness probe for the public hero name.
    fn hero_name_in_use(&self, hero_name: &str, exclude: Option<HeroId>) -> bool {
        self.heroes
            .iter()
            .any(|(id, row)| Some(*id) != exclude && row.hero_name == hero_name)
    }

    fn set_hero_links(&mut self, id: HeroId, power_ids: &[PowerId]) {
        for pid in self.power_ids_of(id) {
            self.links.remove(&(id, pid));
        }
        for pid in power_ids {
            self.links.insert((id, *pid));
        }
    }

    fn remove_hero(&mut self, id: HeroId) {
        self.heroes.remove(&id);
        for pid in self.power_ids_of(id) {
            self.links.remove(&(id, pid));
        }
    }
}

struct CatalogInner {
    state: RwLock<CatalogState>,
    tokens: TokenSource,
    next_hero_id: AtomicI64,
    next_power_id: AtomicI64,
}

/// In-memory implementation of [`CatalogStore`].
pub struct MemoryCatalog {
    inner: Arc<CatalogInner>,
}

impl MemoryCatalog {
    /// Empty catalog with sequence tokens.
    pub fn new() -> Self {
        Self::with_strategy(TokenStrategy::default())
    }

    pub fn with_strategy(strategy: TokenStrategy) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                state: RwLock::new(CatalogState::default()),
                tokens: TokenSource::new(strategy),
                next_hero_id: AtomicI64::new(1),
                next_power_id: AtomicI64::new(1),
            }),
        }
    }

    pub fn token_strategy(&self) -> TokenStrategy {
        self.inner.tokens.strategy()
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn begin(&self) -> Result<Box<dyn CatalogTx>> {
        let working = self.inner.state.read().await.clone();
        Ok(Box::new(MemoryTx {
            inner: Arc::clone(&self.inner),
            working,
            writes: WriteSet::default(),
        }))
    }
}

/// Staged writes of one transaction. For updated heroes the token observed in
/// the snapshot rides along for the commit-time compare-and-swap.
#[derive(Debug, Default)]
struct WriteSet {
    inserted_heroes: Vec<HeroId>,
    updated_heroes: Vec<(HeroId, VersionToken)>,
    deleted_heroes: Vec<HeroId>,
    inserted_powers: Vec<PowerId>,
}

impl WriteSet {
    fn is_empty(&self) -> bool {
        self.inserted_heroes.is_empty()
            && self.updated_heroes.is_empty()
            && self.deleted_heroes.is_empty()
            && self.inserted_powers.is_empty()
    }

    fn inserted_here(&self, id: HeroId) -> bool {
        self.inserted_heroes.contains(&id)
    }
}

struct MemoryTx {
    inner: Arc<CatalogInner>,
    working: CatalogState,
    writes: WriteSet,
}

impl MemoryTx {
    fn staged_hero(&self, id: HeroId) -> Result<HeroRecord> {
        self.working
            .hero_record(id)
            .ok_or_else(|| StoreError::Internal(format!("staged hero {id} vanished")))
    }
}

#[async_trait]
impl CatalogTx for MemoryTx {
    async fn hero_by_id(&self, id: HeroId) -> Result<Option<HeroRecord>> {
        Ok(self.working.hero_record(id))
    }

    async fn list_heroes(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<HeroSlice> {
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let matching: Vec<HeroId> = self
            .working
            .heroes
            .iter()
            .filter(|(_, row)| match &needle {
                Some(n) => {
                    row.name.to_lowercase().contains(n) || row.hero_name.to_lowercase().contains(n)
                }
                None => true,
            })
            .map(|(id, _)| *id)
            .collect();
        let total = matching.len() as u64;
        let start = (page.max(1) as usize - 1).saturating_mul(page_size as usize);
        let heroes = matching
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .filter_map(|id| self.working.hero_record(id))
            .collect();
        Ok(HeroSlice { heroes, total })
    }

    async fn hero_name_taken(&self, hero_name: &str, exclude: Option<HeroId>) -> Result<bool> {
        Ok(self.working.hero_name_in_use(hero_name, exclude))
    }

    async fn list_powers(&self) -> Result<Vec<PowerRecord>> {
        Ok(self
            .working
            .powers
            .iter()
            .map(|(id, row)| PowerRecord {
                id: *id,
                name: row.name.clone(),
                description: row.description.clone(),
            })
            .collect())
    }

    async fn insert_hero(&mut self, draft: HeroDraft, power_ids: &[PowerId]) -> Result<HeroRecord> {
        if self.working.hero_name_in_use(&draft.hero_name, None) {
            return Err(StoreError::DuplicateHeroName(draft.hero_name));
        }
        // Ids are allocated store-wide, so a record staged here keeps its id
        // even if other transactions commit first. Aborts leave gaps.
        let id = self.inner.next_hero_id.fetch_add(1, Ordering::SeqCst);
        let version = self.inner.tokens.next();
        self.working.heroes.insert(
            id,
            HeroRow {
                name: draft.name,
                hero_name: draft.hero_name,
                birth_date: draft.birth_date,
                height_m: draft.height_m,
                weight_kg: draft.weight_kg,
                version,
            },
        );
        for pid in power_ids {
            // Unknown catalog ids are dropped, not errored.
            if self.working.powers.contains_key(pid) {
                self.working.links.insert((id, *pid));
            }
        }
        self.writes.inserted_heroes.push(id);
        self.staged_hero(id)
    }

    async fn update_hero(
        &mut self,
        id: HeroId,
        draft: HeroDraft,
        desired_power_ids: &[PowerId],
        expected: &VersionToken,
    ) -> Result<HeroRecord> {
        let row = match self.working.heroes.get(&id) {
            Some(row) => row.clone(),
            None => return Err(StoreError::HeroNotFound(id)),
        };
        if row.version != *expected {
            return Err(StoreError::StaleVersion);
        }
        if self.working.hero_name_in_use(&draft.hero_name, Some(id)) {
            return Err(StoreError::DuplicateHeroName(draft.hero_name));
        }

        let desired: Vec<PowerId> = desired_power_ids
            .iter()
            .copied()
            .filter(|pid| self.working.powers.contains_key(pid))
            .collect();
        let current = self.working.power_ids_of(id).into_iter().collect();
        let delta = reconcile(&current, &desired);
        for pid in &delta.to_remove {
            self.working.links.remove(&(id, *pid));
        }
        for pid in &delta.to_add {
            self.working.links.insert((id, *pid));
        }

        let version = self.inner.tokens.next();
        self.working.heroes.insert(
            id,
            HeroRow {
                name: draft.name,
                hero_name: draft.hero_name,
                birth_date: draft.birth_date,
                height_m: draft.height_m,
                weight_kg: draft.weight_kg,
                version,
            },
        );

        // A hero inserted by this same transaction is still just an insert.
        let already_tracked = self.writes.inserted_here(id)
            || self.writes.updated_heroes.iter().any(|(h, _)| *h == id);
        if !already_tracked {
            self.writes.updated_heroes.push((id, expected.clone()));
        }
        self.staged_hero(id)
    }

    async fn delete_hero(&mut self, id: HeroId) -> Result<()> {
        if !self.working.heroes.contains_key(&id) {
            return Err(StoreError::HeroNotFound(id));
        }
        self.working.remove_hero(id);
        if self.writes.inserted_here(id) {
            self.writes.inserted_heroes.retain(|h| *h != id);
            self.writes.updated_heroes.retain(|(h, _)| *h != id);
        } else {
            self.writes.updated_heroes.retain(|(h, _)| *h != id);
            self.writes.deleted_heroes.push(id);
        }
        Ok(())
    }

    async fn insert_power(&mut self, name: &str, description: &str) -> Result<PowerRecord> {
        let id = self.inner.next_power_id.fetch_add(1, Ordering::SeqCst);
        self.working.powers.insert(
            id,
            PowerRow {
                name: name.to_string(),
                description: description.to_string(),
            },
        );
        self.writes.inserted_powers.push(id);
        self.working
            .power_record(id)
            .ok_or_else(|| StoreError::Internal(format!("staged power {id} vanished")))
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTx {
            inner,
            working,
            writes,
        } = *self;
        if writes.is_empty() {
            return Ok(());
        }

        let mut committed = inner.state.write().await;

        // Validation first; the root is only replaced after every staged
        // write has passed, so a rejected commit leaves no trace.
        for (id, expected) in &writes.updated_heroes {
            match committed.heroes.get(id) {
                Some(live) if live.version == *expected => {}
                _ => return Err(StoreError::StaleVersion),
            }
        }
        for id in &writes.deleted_heroes {
            if !committed.heroes.contains_key(id) {
                return Err(StoreError::StaleVersion);
            }
        }

        let mut next = committed.clone();
        for id in &writes.deleted_heroes {
            next.remove_hero(*id);
        }
        for (id, _) in &writes.updated_heroes {
            let row = working
                .heroes
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::Internal(format!("staged hero {id} vanished")))?;
            if next.hero_name_in_use(&row.hero_name, Some(*id)) {
                return Err(StoreError::DuplicateHeroName(row.hero_name));
            }
            next.heroes.insert(*id, row);
            next.set_hero_links(*id, &working.power_ids_of(*id));
        }
        for id in &writes.inserted_heroes {
            let row = working
                .heroes
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::Internal(format!("staged hero {id} vanished")))?;
            if next.hero_name_in_use(&row.hero_name, None) {
                return Err(StoreError::DuplicateHeroName(row.hero_name));
            }
            next.heroes.insert(*id, row);
            next.set_hero_links(*id, &working.power_ids_of(*id));
        }
        for id in &writes.inserted_powers {
            let row = working
                .powers
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::Internal(format!("staged power {id} vanished")))?;
            next.powers.insert(*id, row);
        }

        *committed = next;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        // Staged state is owned by the transaction; dropping it is the
        // rollback.
        Ok(())
    }
}
