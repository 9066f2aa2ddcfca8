//! Storage trait definitions for Doorlot
//!
//! `KvStore` is the only storage abstraction: string keys to string values,
//! with a batch write that must land as one unit. Higher layers keep JSON in
//! the values via [`read_json`] and [`encode_json`].
//!
//! All operations are synchronous. In-memory fakes are provided for testing
//! via the `fakes` module.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// String key-value store.
///
/// Guarantees:
/// - `get` after a successful `set` returns the value just written.
/// - `set_many` applies every entry or none of them; no reader observes a
///   partial batch.
/// - A failed write leaves previously stored values untouched.
pub trait KvStore: Send + Sync {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a single value.
    fn set(&self, key: &str, value: String) -> StorageResult<()> {
        self.set_many(vec![(key.to_string(), value)])
    }

    /// Write several values as one unit.
    fn set_many(&self, entries: Vec<(String, String)>) -> StorageResult<()>;

    /// Delete `key`. No-op if absent.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Read and decode a JSON value. Returns `Ok(None)` when the key is absent.
pub fn read_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> StorageResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Encode a value as JSON for storage.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> StorageResult<String> {
    serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))
}
