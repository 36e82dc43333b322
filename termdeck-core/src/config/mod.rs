//! Configuration management for `termdeck`
//!
//! This module provides the `ConfigManager` for loading and saving the
//! settings file in TOML format.

pub mod keybindings;
mod manager;
pub mod settings;

pub use keybindings::{
    KeybindingCategory, KeybindingDef, KeybindingSettings, command_for_action,
    default_keybindings, is_valid_accelerator,
};
pub use manager::{CONFIG_DIR_NAME, ConfigManager, SETTINGS_FILE_NAME};
pub use settings::{AppSettings, LoggingSettings, TabSettings};
