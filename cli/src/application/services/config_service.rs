//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{DockyardConfig, EngineConfig, apply_config_value};

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<DockyardConfig> {
    store.load()
}

/// Validate and persist one setting. Returns the updated configuration.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<DockyardConfig> {
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    tracing::info!(key, "setting saved");
    Ok(config)
}

/// Restore the engine section to its defaults.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn reset_engine(store: &impl ConfigStore) -> Result<DockyardConfig> {
    let mut config = store.load()?;
    config.engine = EngineConfig::default();
    store.save(&config)?;
    Ok(config)
}
