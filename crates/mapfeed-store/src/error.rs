//! Error types for record and user stores.

use std::path::PathBuf;

/// Errors that can occur when talking to a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store cannot be reached right now.
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    /// A query did not complete in time.
    #[error("store operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// An I/O error occurred while loading data files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A data file could not be decoded.
    #[error("parse error in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// A record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a new store unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the same operation might succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }
}
