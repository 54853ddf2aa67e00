#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{validate_base_url, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Port the backend listens on when launched locally.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8765";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Settings for the shared request client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin; every endpoint path is resolved against it.
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_base_url("client.base_url", &self.base_url)?;
        validate_positive_number("client.timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}
