//! CLI error types and exit codes.

use std::path::PathBuf;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, script, runtime or output problems
    pub const GENERAL_ERROR: i32 = 1;
    /// The script ran but the backend rejected one or more session intents
    pub const SESSION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Script could not be read or parsed
    #[error("Script error in {path}: {message}")]
    Script {
        /// Script file
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Async runtime could not be started
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Output could not be serialized
    #[error("Output error: {0}")]
    Output(String),

    /// Session intents failed during a replay
    #[error("{0} session intent(s) failed")]
    SessionFailures(usize),
}

impl From<termdeck_core::error::TermdeckError> for CliError {
    fn from(err: termdeck_core::error::TermdeckError) -> Self {
        use termdeck_core::error::TermdeckError;
        match err {
            TermdeckError::Config(e) => Self::Config(e.to_string()),
            TermdeckError::Session(e) => Self::Runtime(e.to_string()),
        }
    }
}

impl From<termdeck_core::error::ConfigError> for CliError {
    fn from(err: termdeck_core::error::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, script, runtime, output)
    /// - 2: Session failure (backend rejected an intent)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::SessionFailures(_) => exit_codes::SESSION_FAILURE,
            Self::Config(_) | Self::Script { .. } | Self::Runtime(_) | Self::Output(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}
