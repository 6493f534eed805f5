//! Host settings read from the apprc `market` section

use serde::{Deserialize, Serialize};

use super::apprc::Config;
use crate::error::MarketResult;

/// User-facing preferences for the ledger session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Line printed when a session starts
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Number of transactions `history` shows without an explicit count
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_greeting() -> String {
    "Welcome to Market!".to_string()
}

fn default_history_limit() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            history_limit: default_history_limit(),
        }
    }
}

impl Settings {
    /// Read the `market` section, falling back to defaults when it is absent
    pub fn from_config(config: &Config) -> MarketResult<Self> {
        match config.section::<Settings>("market") {
            Err(e) if e.is_not_found() => Ok(Settings::default()),
            other => other,
        }
    }
}
