//! Errors for loading and running chain files.
//!
//! These are failures of the tooling around a chain, never failures of the
//! chain itself: those travel through the lazy result.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for chain file operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read chain file '{path}': {reason}")]
    FileReadFailed { path: PathBuf, reason: String },

    #[error("TOML parse error: {reason}")]
    TomlParseFailed { reason: String },

    #[error("invalid chain: {reason}")]
    InvalidChain { reason: String },

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file read error.
    pub fn file_read_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileReadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a TOML parse error.
    pub fn toml_parse_failed(reason: impl Into<String>) -> Self {
        Self::TomlParseFailed {
            reason: reason.into(),
        }
    }

    /// Create an invalid chain error.
    pub fn invalid_chain(reason: impl Into<String>) -> Self {
        Self::InvalidChain {
            reason: reason.into(),
        }
    }
}

/// Result alias for chain file operations.
pub type Result<T> = std::result::Result<T, Error>;
