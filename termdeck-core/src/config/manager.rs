//! Settings file loading and saving

use std::path::{Path, PathBuf};

use super::settings::AppSettings;
use crate::error::{ConfigError, ConfigResult};

/// Name of the application's configuration directory.
pub const CONFIG_DIR_NAME: &str = "termdeck";

/// Name of the settings file inside the configuration directory.
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Locates, reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager rooted at the given directory.
    #[must_use]
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Creates a manager rooted at the platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the platform has no configuration
    /// directory.
    pub fn with_default_dir() -> ConfigResult<Self> {
        Self::default_dir().map(Self::new)
    }

    /// Returns `<platform config dir>/termdeck`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the platform has no configuration
    /// directory.
    pub fn default_dir() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME))
            .ok_or(ConfigError::NotFound)
    }

    /// Returns the configuration directory.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the settings file path.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE_NAME)
    }

    /// Loads settings, returning defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_settings(&self) -> ConfigResult<AppSettings> {
        Self::load_from(&self.settings_path())
    }

    /// Loads settings from an explicit file, returning defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> ConfigResult<AppSettings> {
        let _span = crate::trace_operation_debug!(
            crate::tracing::span_names::CONFIG_LOAD,
            path = %path.display()
        )
        .entered();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(AppSettings::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes settings, creating the configuration directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()> {
        let path = self.settings_path();
        let content = toml::to_string_pretty(settings)?;
        std::fs::create_dir_all(&self.config_dir)
            .and_then(|()| std::fs::write(&path, content))
            .map_err(|source| ConfigError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "Settings saved");
        Ok(())
    }
}
