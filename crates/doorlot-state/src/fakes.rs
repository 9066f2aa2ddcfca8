//! In-memory fakes for the storage trait (testing only)
//!
//! `MemoryKvStore` satisfies the `KvStore` contract without touching disk.
//! An optional byte quota mimics a full browser storage area: a write that
//! would push the total size over the quota is rejected with
//! `StorageError::Unavailable` and nothing is applied.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StorageError;
use crate::store::{KvStore, StorageResult};

/// In-memory key-value store backed by a `HashMap<key, value>`.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(bytes),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn footprint(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock()?;
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, batch: Vec<(String, String)>) -> StorageResult<()> {
        let mut entries = self.entries.lock()?;

        if let Some(quota) = self.quota_bytes {
            let mut staged = entries.clone();
            staged.extend(batch.iter().cloned());
            let needed = Self::footprint(&staged);
            if needed > quota {
                return Err(StorageError::Unavailable {
                    reason: format!("quota exceeded: {needed} > {quota} bytes"),
                });
            }
        }

        entries.extend(batch);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock()?;
        entries.remove(key);
        Ok(())
    }
}
