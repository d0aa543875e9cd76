//! Configuration management for the SRMA client
//!
//! Supports loading configuration from:
//! - Default values
//! - An optional config file (config/srma.toml)
//! - Environment variables (prefixed with SRMA__)
//!
//! The base address override is read once at process start; absence
//! falls back to the fixed local default.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level client configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    /// API endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Query cache configuration
    #[serde(default)]
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base address of the SRMA Engine API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    /// Freshness window for cached reads, in seconds. A slot older than
    /// this refetches on the next read.
    #[serde(default = "default_stale_after")]
    pub stale_after_secs: u64,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_stale_after() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            stale_after_secs: default_stale_after(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the optional file and environment
    /// variables, e.g. SRMA__API__BASE_URL=http://staging:8000
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/srma").required(false))
            .add_source(
                Environment::with_prefix("SRMA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Cache freshness window as Duration
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.cache.stale_after_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.stale_after(), Duration::from_secs(30));
    }
}
