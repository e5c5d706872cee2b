//! Configuration loading and store construction shared by the commands

use crate::cli::ConnectionArgs;
use crate::config::FleetscopeConfig;
use crate::store::{HttpBackingStore, SharedStore};
use std::sync::Arc;

/// Load configuration with CLI overrides
///
/// File (when present), then `FLEETSCOPE_*` environment variables, then
/// command-line flags. The result is validated.
pub fn load_config_with_overrides(
    args: &ConnectionArgs,
) -> Result<FleetscopeConfig, Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        FleetscopeConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        FleetscopeConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(ref url) = args.store_url {
        config.store.base_url = url.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Build the HTTP backing store for `config`.
pub fn connect(config: &FleetscopeConfig) -> Result<SharedStore, Box<dyn std::error::Error>> {
    let store = HttpBackingStore::new(&config.store)?;
    tracing::debug!(base_url = %store.base_url(), "Backing store configured");
    Ok(Arc::new(store))
}
