//! Reference-data seeding.
//!
//! The hero operations never create powers; this module is the external
//! seeder that does. `seed_powers` is idempotent by exact name. The demo hero
//! set is optional bootstrap data for manual poking, derived deterministically
//! so repeated runs produce identical catalogs.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::core::error::Result;
use crate::core::types::PowerId;
use crate::model::HeroDraft;
use crate::store::{CatalogStore, CatalogTx};

/// Canonical superpower catalog.
pub const DEFAULT_POWERS: &[(&str, &str)] = &[
    ("Strength", "Lifts far beyond human limits"),
    ("Endurance", "Shrugs off punishment that would fell anyone else"),
    ("Agility", "Reflexes and balance beyond human limits"),
    ("Speed", "Moves faster than the eye can follow"),
    ("Flight", "Unassisted flight"),
    ("Invisibility", "Vanishes from sight at will"),
    ("Technology", "Arsenal of advanced gadgets and suits"),
    ("Energy", "Projects and absorbs destructive energy"),
    ("Magic", "Commands arcane forces"),
    ("Telepathy", "Reads and influences minds"),
    ("Regeneration", "Heals wounds in moments"),
    ("Shapeshifting", "Assumes other forms and faces"),
    ("Martial Arts", "Mastery of armed and unarmed combat"),
    ("Phasing", "Passes through solid matter"),
];

/// Inserts every entry whose name is not present yet. Returns the number of
/// powers inserted.
pub async fn seed_powers(store: &dyn CatalogStore, entries: &[(&str, &str)]) -> Result<usize> {
    let mut tx = store.begin().await?;
    let existing: Vec<String> = tx
        .list_powers()
        .await?
        .into_iter()
        .map(|power| power.name)
        .collect();
    let mut inserted = 0;
    for (name, description) in entries {
        if existing.iter().any(|known| known == name) {
            continue;
        }
        tx.insert_power(name, description).await?;
        inserted += 1;
    }
    tx.commit().await?;
    Ok(inserted)
}

pub struct DemoHero {
    pub hero_name: &'static str,
    pub name: &'static str,
    pub powers: &'static [&'static str],
}

/// Curated demo roster. Powers refer to [`DEFAULT_POWERS`] names.
pub const DEMO_HEROES: &[DemoHero] = &[
    DemoHero { hero_name: "Spider-Man", name: "Peter Parker", powers: &["Agility", "Strength"] },
    DemoHero { hero_name: "Iron Man", name: "Tony Stark", powers: &["Technology", "Energy"] },
    DemoHero { hero_name: "Captain America", name: "Steve Rogers", powers: &["Strength", "Endurance"] },
    DemoHero { hero_name: "Thor", name: "Thor Odinson", powers: &["Strength", "Flight", "Energy"] },
    DemoHero { hero_name: "Hulk", name: "Bruce Banner", powers: &["Strength", "Endurance"] },
    DemoHero { hero_name: "Black Widow", name: "Natasha Romanoff", powers: &["Agility", "Martial Arts"] },
    DemoHero { hero_name: "Hawkeye", name: "Clint Barton", powers: &["Agility"] },
    DemoHero { hero_name: "Doctor Strange", name: "Stephen Strange", powers: &["Magic"] },
    DemoHero { hero_name: "Black Panther", name: "T'Challa", powers: &["Agility", "Strength", "Martial Arts"] },
    DemoHero { hero_name: "Captain Marvel", name: "Carol Danvers", powers: &["Flight", "Energy", "Strength"] },
    DemoHero { hero_name: "Scarlet Witch", name: "Wanda Maximoff", powers: &["Magic", "Energy"] },
    DemoHero { hero_name: "Vision", name: "Vision", powers: &["Flight", "Energy", "Phasing"] },
    DemoHero { hero_name: "Falcon", name: "Sam Wilson", powers: &["Flight"] },
    DemoHero { hero_name: "Winter Soldier", name: "Bucky Barnes", powers: &["Strength"] },
    DemoHero { hero_name: "Ant-Man", name: "Scott Lang", powers: &["Technology"] },
    DemoHero { hero_name: "Wasp", name: "Hope van Dyne", powers: &["Technology", "Flight"] },
    DemoHero { hero_name: "Star-Lord", name: "Peter Quill", powers: &["Technology"] },
    DemoHero { hero_name: "Gamora", name: "Gamora", powers: &["Agility", "Martial Arts"] },
    DemoHero { hero_name: "Drax", name: "Drax", powers: &["Strength", "Endurance"] },
    DemoHero { hero_name: "Rocket Raccoon", name: "Rocket", powers: &["Technology"] },
    DemoHero { hero_name: "Groot", name: "Groot", powers: &["Strength", "Regeneration"] },
    DemoHero { hero_name: "Mantis", name: "Mantis", powers: &["Telepathy"] },
    DemoHero { hero_name: "Wolverine", name: "Logan", powers: &["Regeneration", "Strength"] },
    DemoHero { hero_name: "Mystique", name: "Raven Darkholme", powers: &["Shapeshifting"] },
];

/// Loads [`DEMO_HEROES`] into an empty catalog. Does nothing if any hero
/// already exists. Returns the number of heroes inserted.
pub async fn seed_demo_heroes(store: &dyn CatalogStore) -> Result<usize> {
    let mut tx = store.begin().await?;
    if tx.list_heroes(1, 1, None).await?.total > 0 {
        tx.rollback().await?;
        return Ok(0);
    }

    let catalog: HashMap<String, PowerId> = tx
        .list_powers()
        .await?
        .into_iter()
        .map(|power| (power.name, power.id))
        .collect();

    let mut inserted = 0;
    for (index, entry) in DEMO_HEROES.iter().enumerate() {
        let mut power_ids: Vec<PowerId> = entry
            .powers
            .iter()
            .filter_map(|name| catalog.get(*name).copied())
            .collect();
        if power_ids.is_empty() {
            // Heroes are always created with at least one power; fall back to
            // a baseline pick when the catalog is missing the listed ones.
            power_ids = ["Agility", "Strength"]
                .iter()
                .find_map(|name| catalog.get(*name).copied())
                .into_iter()
                .collect();
        }
        if power_ids.is_empty() {
            tracing::warn!(hero = entry.hero_name, "skipping demo hero, no seedable powers");
            continue;
        }
        tx.insert_hero(demo_draft(index, entry), &power_ids).await?;
        inserted += 1;
    }
    tx.commit().await?;
    Ok(inserted)
}

fn demo_draft(index: usize, entry: &DemoHero) -> HeroDraft {
    HeroDraft {
        name: entry.name.to_string(),
        hero_name: entry.hero_name.to_string(),
        birth_date: demo_birth_date(index),
        height_m: demo_height(index),
        weight_kg: demo_weight(index),
    }
}

// NaiveDate::default() is 1970-01-01, the roster's base date.
fn demo_birth_date(index: usize) -> NaiveDate {
    NaiveDate::default() + Duration::days(30 * index as i64)
}

fn demo_height(index: usize) -> f64 {
    ((1.65 + (index % 50) as f64 * 0.01) * 100.0).round() / 100.0
}

fn demo_weight(index: usize) -> f64 {
    60.0 + (index % 80) as f64
}
