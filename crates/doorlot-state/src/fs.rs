//! Single-file JSON store: the whole map is rewritten through a temp file on every write.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StorageError;
use crate::store::{KvStore, StorageResult};

/// File-backed key-value store.
///
/// Layout: a single JSON object `{ "<key>": "<value>", ... }` at `path`.
/// The file is re-read on every operation so separate processes sharing the
/// file see each other's writes. Every write replaces the whole file via a
/// temp file in the same directory followed by a rename, so a batch is
/// either fully visible or not at all.
pub struct FsKvStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FsKvStore {
    /// Open (or lazily create) the store at `path`. Creates the parent
    /// directory if needed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
            key: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let data = serde_json::to_vec_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), keys = entries.len(), "store persisted");
        Ok(())
    }
}

impl KvStore for FsKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set_many(&self, entries: Vec<(String, String)>) -> StorageResult<()> {
        let _guard = self.write_lock.lock()?;
        let mut current = self.load()?;
        current.extend(entries);
        self.persist(&current)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock()?;
        let mut current = self.load()?;
        if current.remove(key).is_some() {
            self.persist(&current)?;
        }
        Ok(())
    }
}
