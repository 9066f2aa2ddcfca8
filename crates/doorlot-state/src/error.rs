//! Error types for doorlot-state

use thiserror::Error;

/// Errors that can occur in the persistence layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// The store rejected a read or write (I/O failure, quota exceeded)
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    /// A stored value could not be decoded
    #[error("stored value under '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    /// A value could not be encoded for storage
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl StorageError {
    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        StorageError::Unavailable {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::unavailable(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StorageError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StorageError::unavailable("store lock poisoned")
    }
}
