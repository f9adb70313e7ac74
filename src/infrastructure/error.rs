//! Store-level errors (storage unavailable, timed out, unreadable)

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by a [`CategoryStore`](crate::infrastructure::traits::CategoryStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store timed out after {waited_ms} ms during {operation}")]
    Timeout {
        operation: &'static str,
        waited_ms: u64,
    },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store file is corrupt: {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("serialize store: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, StoreError::Timeout { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
