//! Effective configuration command.

use std::path::Path;

use termdeck_core::config::AppSettings;

use crate::error::CliError;
use crate::util::create_config_manager;

/// Config command handler
pub fn cmd_config(
    config_path: Option<&Path>,
    settings: &AppSettings,
    defaults: bool,
) -> Result<(), CliError> {
    let shown = if defaults {
        AppSettings::default()
    } else {
        settings.clone()
    };
    let content = toml::to_string_pretty(&shown)
        .map_err(|e| CliError::Output(format!("Failed to serialize settings: {e}")))?;

    if !defaults && let Ok(manager) = create_config_manager(config_path) {
        println!("# {}", manager.settings_path().display());
    }
    print!("{content}");
    Ok(())
}
