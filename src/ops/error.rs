use thiserror::Error;

use crate::core::context::OpContext;
use crate::core::error::StoreError;
use crate::ops::outcome::{OpResult, OpStatus};

pub(crate) const MSG_HERO_NOT_FOUND: &str = "Hero not found.";
pub(crate) const MSG_DUPLICATE_HERO_NAME: &str = "A hero with this hero name already exists.";
pub(crate) const MSG_STALE_VERSION: &str =
    "Concurrency conflict: the record was modified by another process.";
pub(crate) const MSG_NO_HEROES: &str = "No heroes found.";

/// Operation-level error taxonomy. Converted into a result envelope at the
/// operation boundary; `Unexpected` is the only kind whose detail stays out
/// of the envelope.
#[derive(Error, Debug)]
pub enum OpError {
    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl OpError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Folds the error into an envelope. Unexpected detail is logged here and
    /// replaced by a generic message carrying the correlation id.
    pub(crate) fn into_result<T>(self, ctx: &OpContext) -> OpResult<T> {
        match self {
            OpError::Invalid(message) => OpResult::fail(OpStatus::InvalidArgument, message),
            OpError::NotFound(message) => OpResult::fail(OpStatus::NotFound, message),
            OpError::Conflict(message) => OpResult::fail(OpStatus::Conflict, message),
            OpError::Unexpected(detail) => {
                tracing::error!(
                    error = %detail,
                    correlation = %ctx.correlation_id(),
                    "operation failed unexpectedly"
                );
                OpResult::fail(
                    OpStatus::Unexpected,
                    format!("Unexpected error (correlation id {}).", ctx.correlation_id()),
                )
            }
        }
    }
}

impl From<StoreError> for OpError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::HeroNotFound(_) => OpError::NotFound(MSG_HERO_NOT_FOUND.to_string()),
            StoreError::DuplicateHeroName(_) => {
                OpError::Conflict(MSG_DUPLICATE_HERO_NAME.to_string())
            }
            StoreError::StaleVersion => OpError::Conflict(MSG_STALE_VERSION.to_string()),
            StoreError::InvalidToken(detail) => {
                OpError::Invalid(format!("invalid version token: {detail}"))
            }
            StoreError::Internal(detail) => OpError::Unexpected(detail),
        }
    }
}
