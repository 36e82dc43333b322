//! Shared utility functions used across command modules.

use std::path::Path;

use termdeck_core::config::{AppSettings, ConfigManager};

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::new(path)),
        None => ConfigManager::with_default_dir()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads settings, falling back to defaults when no file exists.
pub fn load_settings(config_path: Option<&Path>) -> Result<AppSettings, CliError> {
    let manager = create_config_manager(config_path)?;
    Ok(manager.load_settings()?)
}
