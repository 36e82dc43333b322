//! Error types for `termdeck`
//!
//! Layout operations never fail: unknown ids are absorbed as no-ops and
//! last-leaf removals degrade to an empty-but-alive result. The errors here
//! cover the asynchronous session boundary and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::id::SessionId;

/// Errors reported by a session backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The backend could not start the session
    #[error("Failed to create session {session_id}: {reason}")]
    CreateFailed {
        /// Session that was requested
        session_id: SessionId,
        /// Backend-provided reason
        reason: String,
    },

    /// The backend could not tear the session down
    #[error("Failed to destroy session {session_id}: {reason}")]
    DestroyFailed {
        /// Session that was targeted
        session_id: SessionId,
        /// Backend-provided reason
        reason: String,
    },

    /// The backend is not reachable
    #[error("Session backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while loading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Writing the file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid TOML for the settings schema
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File that could not be parsed
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// Serializing settings failed
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No configuration directory could be determined
    #[error("Configuration directory not found")]
    NotFound,
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum TermdeckError {
    /// Session backend error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for session backend operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type for `termdeck` operations
pub type Result<T> = std::result::Result<T, TermdeckError>;
