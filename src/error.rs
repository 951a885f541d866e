//! Error types for configuration and replay scripts.

use thiserror::Error;

/// Errors from loading or saving editor configuration and scripts.
///
/// Editing itself never fails; only the file/JSON boundary does.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File written by a newer version of the format
    #[error("Config version {found} is newer than supported version {supported}")]
    VersionMismatch {
        /// Version found in the file
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },

    /// A value parsed but is out of its allowed range
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Name of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
