use std::env;

use crate::core::token::TokenStrategy;

/// Runtime configuration for the demo binary, read from the process
/// environment. A `.env` file next to the binary is honored when present.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Which version-token generator the store uses.
    pub token_strategy: TokenStrategy,
    /// Whether startup seeds a batch of sample heroes on top of the power
    /// catalog.
    pub seed_demo: bool,
}

impl AppConfig {
    /// Loads configuration, falling back to defaults for anything unset.
    /// Malformed values are reported rather than silently replaced.
    ///
    /// Recognized variables:
    /// - `HERODEX_TOKEN_STRATEGY`: `sequence` (default) or `random`
    /// - `HERODEX_SEED_DEMO`: boolean, off by default
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(raw) = env::var("HERODEX_TOKEN_STRATEGY") {
            config.token_strategy = raw
                .parse()
                .map_err(|err| anyhow::anyhow!("HERODEX_TOKEN_STRATEGY: {err}"))?;
        }
        if let Ok(raw) = env::var("HERODEX_SEED_DEMO") {
            config.seed_demo = parse_bool(&raw).ok_or_else(|| {
                anyhow::anyhow!("HERODEX_SEED_DEMO: expected a boolean, got '{raw}'")
            })?;
        }
        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
