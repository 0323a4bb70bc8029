use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading `.env` files or resolving configuration values.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required environment variable '{key}' not found")]
    MissingConfiguration { key: String },

    /// Any read failure other than the file not existing.
    #[error("Failed to read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("{key} contains invalid UTF-8")]
    NotUnicode { key: String },
}

impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        ConfigError::MissingConfiguration { key: key.into() }
    }
}
