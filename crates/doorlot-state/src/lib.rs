//! Doorlot-State: key-value persistence for Doorlot
//!
//! Every piece of Doorlot state (participants, draw history, accounts,
//! session, export settings) is a JSON-encoded string stored under a
//! well-known key. This crate owns the store abstraction and its backends;
//! it knows nothing about what the values mean.
//!
//! ## Key Components
//!
//! - `KvStore`: the injected storage capability (get / set / set_many / remove)
//! - `FsKvStore`: single JSON file, every write is an atomic file replacement
//! - `fakes::MemoryKvStore`: in-memory store with an optional byte quota
//! - `keys`: the key names shared by every component

mod error;
pub mod fakes;
pub mod fs;
pub mod keys;
pub mod store;

pub use error::StorageError;
pub use fs::FsKvStore;
pub use store::{encode_json, read_json, KvStore, StorageResult};
