//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a persistence backend. Always fatal to the operation that hit them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed storage file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize storage entries: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
