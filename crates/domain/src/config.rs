//! Configuration structures
//!
//! Loaded by `trak-infra::config` from files and environment, then adjusted
//! by command-line flags in the binary.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS, DEFAULT_API_URL, DEFAULT_LOG_LEVEL,
    DEFAULT_REFRESH_INTERVAL_MS,
};
use crate::{Result, TrakError};

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// REST backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Attempts per request. Mutations are never repeated automatically, so
    /// values above 1 only make sense against an idempotent backend.
    pub max_attempts: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub refresh_interval_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}

impl Config {
    /// Check values that would otherwise fail late at runtime
    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TrakError::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(TrakError::Config("api.timeout_secs must be positive".into()));
        }
        if self.api.max_attempts == 0 {
            return Err(TrakError::Config("api.max_attempts must be at least 1".into()));
        }
        if self.display.refresh_interval_ms == 0 {
            return Err(TrakError::Config("display.refresh_interval_ms must be positive".into()));
        }
        Ok(())
    }
}
