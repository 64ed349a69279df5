use thiserror::Error;

use super::types::HeroId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Hero {0} not found")]
    HeroNotFound(HeroId),

    #[error("Hero name '{0}' is already taken")]
    DuplicateHeroName(String),

    #[error("Version token no longer matches the stored row")]
    StaleVersion,

    #[error("Invalid version token: {0}")]
    InvalidToken(String),

    #[error("Storage error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
