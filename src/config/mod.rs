//! Configuration module for Fleetscope
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`FLEETSCOPE_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use fleetscope::config::FleetscopeConfig;
//!
//! let config = FleetscopeConfig::default();
//! assert_eq!(config.search.debounce_ms, 500);
//!
//! let toml = r#"
//! [store]
//! base_url = "http://fleet.internal:8001"
//! "#;
//! let config: FleetscopeConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.store.base_url, "http://fleet.internal:8001");
//! ```

pub mod dispatch;
pub mod error;
pub mod logging;
pub mod map;
pub mod search;
pub mod store;

pub use dispatch::DispatchConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use map::MapConfig;
pub use search::SearchConfig;
pub use store::StoreConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Commented example written by `fleetscope config init`.
pub const EXAMPLE_CONFIG: &str = include_str!("../../fleetscope.example.toml");

/// Unified configuration for the fleet engine and its CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FleetscopeConfig {
    /// Backing-store connection
    pub store: StoreConfig,
    /// Autocomplete search debounce
    pub search: SearchConfig,
    /// Situational summary shape
    pub dispatch: DispatchConfig,
    /// Map viewport defaults
    pub map: MapConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl FleetscopeConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("FLEETSCOPE_STORE_URL") {
            self.store.base_url = url;
        }
        if let Ok(timeout) = std::env::var("FLEETSCOPE_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.store.timeout_seconds = t;
            }
        }
        if let Ok(debounce) = std::env::var("FLEETSCOPE_DEBOUNCE_MS") {
            if let Ok(d) = debounce.parse() {
                self.search.debounce_ms = d;
            }
        }
        if let Ok(level) = std::env::var("FLEETSCOPE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FLEETSCOPE_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match reqwest::Url::parse(&self.store.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::validation(
                    "store.base_url",
                    format!("unsupported scheme '{}'", url.scheme()),
                ))
            }
            Err(e) => return Err(ConfigError::validation("store.base_url", e.to_string())),
        }

        if self.store.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "store.timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        if self.search.min_query_length == 0 {
            return Err(ConfigError::validation(
                "search.min_query_length",
                "minimum query length must be at least 1",
            ));
        }
        if self.dispatch.max_critical_listed == 0 {
            return Err(ConfigError::validation(
                "dispatch.max_critical_listed",
                "at least one critical machine must be listed",
            ));
        }
        if self.dispatch.reason_max_chars == 0 {
            return Err(ConfigError::validation(
                "dispatch.reason_max_chars",
                "reason length must be non-zero",
            ));
        }

        Ok(())
    }
}
