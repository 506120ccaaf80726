//! Error types for the scheme switcher.

use thiserror::Error;

/// Errors that can occur while reading config or touching preference storage.
#[derive(Error, Debug)]
pub enum SchemeError {
    /// Preference storage rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// A scheme label that is not one of light, dark or auto
    #[error("Unknown scheme: '{0}'")]
    UnknownScheme(String),

    /// JSON parsing or serialization error
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    ConfigVersionTooNew {
        /// Version found in the input
        file_version: u32,
        /// Highest version this build understands
        supported_version: u32,
    },

    /// I/O error from the file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for scheme operations.
pub type Result<T> = std::result::Result<T, SchemeError>;
