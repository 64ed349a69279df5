use serde::{Deserialize, Serialize};

use crate::core::types::PowerId;

/// Superpower row as the store holds it. Reference data, seeded externally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerRecord {
    pub id: PowerId,
    pub name: String,
    pub description: String,
}

/// Boundary-facing superpower representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerDto {
    pub id: PowerId,
    pub name: String,
    pub description: String,
}

impl From<PowerRecord> for PowerDto {
    fn from(record: PowerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
        }
    }
}
