//! Uniform result envelope returned by every operation.
//!
//! Mirrors what the boundary hands to clients: a success flag, a numeric
//! status classification, a human-readable message and an optional payload.
//! The boundary layer turns this into its own transport format.

use serde::{Serialize, Serializer};

/// Status classification of an operation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStatus {
    Ok,
    Created,
    InvalidArgument,
    NotFound,
    Conflict,
    Unexpected,
}

impl OpStatus {
    pub fn code(self) -> u16 {
        match self {
            OpStatus::Ok => 200,
            OpStatus::Created => 201,
            OpStatus::InvalidArgument => 400,
            OpStatus::NotFound => 404,
            OpStatus::Conflict => 409,
            OpStatus::Unexpected => 500,
        }
    }
}

impl Serialize for OpStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

/// Tagged operation result.
#[derive(Debug, Clone, Serialize)]
pub struct OpResult<T> {
    pub success: bool,
    pub status: OpStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> OpResult<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            status: OpStatus::Ok,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Success without a payload (delete).
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            status: OpStatus::Ok,
            message: message.into(),
            data: None,
        }
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            status: OpStatus::Created,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn fail(status: OpStatus, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            message: message.into(),
            data: None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// One page of results plus paging echo and total matching count.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}
