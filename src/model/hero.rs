use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::token::VersionToken;
use crate::core::types::{HeroId, PowerId};
use crate::model::power::{PowerDto, PowerRecord};

/// Scalar hero fields, as written to the store. String fields are expected
/// to be trimmed before a draft is built.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroDraft {
    pub name: String,
    pub hero_name: String,
    pub birth_date: NaiveDate,
    pub height_m: f64,
    pub weight_kg: f64,
}

/// Committed hero row joined with its power associations.
#[derive(Debug, Clone)]
pub struct HeroRecord {
    pub id: HeroId,
    pub name: String,
    pub hero_name: String,
    pub birth_date: NaiveDate,
    pub height_m: f64,
    pub weight_kg: f64,
    pub version: VersionToken,
    /// Associated powers, ordered by power id.
    pub powers: Vec<PowerRecord>,
}

impl HeroRecord {
    pub fn power_ids(&self) -> BTreeSet<PowerId> {
        self.powers.iter().map(|p| p.id).collect()
    }
}

/// Boundary-facing hero representation. The version travels base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroDto {
    pub id: HeroId,
    pub name: String,
    pub hero_name: String,
    pub birth_date: NaiveDate,
    pub height_m: f64,
    pub weight_kg: f64,
    pub version: String,
    pub powers: Vec<PowerDto>,
}

impl From<HeroRecord> for HeroDto {
    fn from(record: HeroRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            hero_name: record.hero_name,
            birth_date: record.birth_date,
            height_m: record.height_m,
            weight_kg: record.weight_kg,
            version: record.version.to_base64(),
            powers: record.powers.into_iter().map(PowerDto::from).collect(),
        }
    }
}

impl HeroDto {
    pub fn power_ids(&self) -> BTreeSet<PowerId> {
        self.powers.iter().map(|p| p.id).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHeroRequest {
    pub name: String,
    pub hero_name: String,
    pub birth_date: NaiveDate,
    pub height_m: f64,
    pub weight_kg: f64,
    pub power_ids: Vec<PowerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateHeroRequest {
    pub id: HeroId,
    pub name: String,
    pub hero_name: String,
    pub birth_date: NaiveDate,
    pub height_m: f64,
    pub weight_kg: f64,
    /// Desired power set after the update. Empty removes every association.
    pub power_ids: Vec<PowerId>,
    /// Token the caller last observed for this hero.
    pub version: VersionToken,
}

/// List parameters as the boundary hands them over. Missing values fall back
/// to defaults; out-of-range values are clamped, not rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListHeroesQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
}
