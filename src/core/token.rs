//! Concurrency tokens and the strategies that mint them.
//!
//! A [`VersionToken`] is an opaque byte string stamped on every hero row and
//! replaced on every successful mutation. Callers treat it as a black box:
//! read it, hand it back unchanged, and let the store decide whether it still
//! matches. At the boundary it travels base64-encoded.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::error::{Result, StoreError};

/// Opaque concurrency token attached to a hero row.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VersionToken(Vec<u8>);

impl VersionToken {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Boundary encoding of the token.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Decodes a boundary-supplied token string.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        STANDARD
            .decode(encoded.trim())
            .map(Self)
            .map_err(|err| StoreError::InvalidToken(err.to_string()))
    }
}

impl fmt::Debug for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionToken({})", self.to_base64())
    }
}

impl Serialize for VersionToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for VersionToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        VersionToken::from_base64(&encoded).map_err(D::Error::custom)
    }
}

/// How fresh token values are generated.
///
/// `Sequence` mimics a database-native row version: an 8-byte big-endian
/// counter. `Random` stamps UUID bytes instead, the strategy for stores
/// without a native version column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenStrategy {
    #[default]
    Sequence,
    Random,
}

impl FromStr for TokenStrategy {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sequence" | "rowversion" => Ok(Self::Sequence),
            "random" => Ok(Self::Random),
            other => Err(format!(
                "unknown token strategy '{other}', expected 'sequence' or 'random'"
            )),
        }
    }
}

impl fmt::Display for TokenStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => write!(f, "sequence"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// Mints tokens for one store instance.
pub struct TokenSource {
    strategy: TokenStrategy,
    counter: AtomicU64,
}

impl TokenSource {
    pub fn new(strategy: TokenStrategy) -> Self {
        Self {
            strategy,
            counter: AtomicU64::new(1),
        }
    }

    pub fn strategy(&self) -> TokenStrategy {
        self.strategy
    }

    /// Next token value. Values handed to aborted transactions are burned,
    /// never reissued.
    pub fn next(&self) -> VersionToken {
        match self.strategy {
            TokenStrategy::Sequence => {
                let n = self.counter.fetch_add(1, Ordering::SeqCst);
                VersionToken::from_bytes(n.to_be_bytes().to_vec())
            }
            TokenStrategy::Random => {
                VersionToken::from_bytes(Uuid::new_v4().as_bytes().to_vec())
            }
        }
    }
}
