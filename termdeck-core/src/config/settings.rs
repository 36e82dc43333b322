//! Application settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::keybindings::KeybindingSettings;
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput};

/// Root of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Tab defaults
    pub tabs: TabSettings,
    /// Keyboard shortcut overrides
    pub keybindings: KeybindingSettings,
    /// Log output
    pub logging: LoggingSettings,
}

/// Titles given to tabs the core creates on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabSettings {
    /// Title of new local shell tabs
    pub local_title: String,
    /// Title of the settings tab
    pub settings_title: String,
}

impl Default for TabSettings {
    fn default() -> Self {
        Self {
            local_title: "Local Shell".to_string(),
            settings_title: "Settings".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level name (`error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
    /// Optional `EnvFilter` directive overriding `level`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Log file; events go to stderr when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            filter: None,
            file: None,
        }
    }
}

impl LoggingSettings {
    /// Builds a tracing configuration, falling back to `info` for an
    /// unknown level name.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let level = self.level.parse().unwrap_or(TracingLevel::Info);
        let output = self
            .file
            .clone()
            .map_or(TracingOutput::Stderr, |path| TracingOutput::File { path });
        let config = TracingConfig::new().with_level(level).with_output(output);
        match &self.filter {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings: AppSettings = toml::from_str("").unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.tabs.local_title, "Local Shell");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings: AppSettings = toml::from_str(
            r#"
            [tabs]
            settings_title = "Preferences"

            [keybindings.overrides]
            "win.close-tab" = "<Control><Shift>x"
            "#,
        )
        .unwrap();
        assert_eq!(settings.tabs.settings_title, "Preferences");
        assert_eq!(settings.tabs.local_title, "Local Shell");
        assert_eq!(
            settings.keybindings.overrides.get("win.close-tab").map(String::as_str),
            Some("<Control><Shift>x")
        );
    }

    #[test]
    fn logging_settings_map_to_tracing_config() {
        let logging = LoggingSettings {
            level: "debug".to_string(),
            filter: Some("termdeck_core=trace".to_string()),
            file: None,
        };
        let config = logging.tracing_config();
        assert_eq!(config.level, TracingLevel::Debug);
        assert_eq!(config.filter.as_deref(), Some("termdeck_core=trace"));
        assert_eq!(config.output, TracingOutput::Stderr);
    }

    #[test]
    fn log_file_selects_file_output() {
        let settings: AppSettings =
            toml::from_str("[logging]\nfile = \"/var/log/termdeck.log\"\n").unwrap();
        assert_eq!(
            settings.logging.tracing_config().output,
            TracingOutput::File {
                path: PathBuf::from("/var/log/termdeck.log")
            }
        );
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let logging = LoggingSettings {
            level: "loud".to_string(),
            filter: None,
            file: None,
        };
        assert_eq!(logging.tracing_config().level, TracingLevel::Info);
    }
}
