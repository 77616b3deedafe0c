//! Key-Value Store
//!
//! The storage contract the dispatch layer depends on, plus the two
//! shipped backends: in-memory and one-file-per-record on disk.
//! The store owns all format and concurrency concerns; callers see
//! individually atomic operations.

use serde_json::Value;

pub mod disk;
pub mod errors;
pub mod memory;

pub use disk::DiskStore;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;

/// Trait for pluggable key-value backends.
///
/// Records are JSON values grouped by namespace (one namespace per
/// resource). Shared read/write across in-flight requests.
pub trait KeyValueStore: Send + Sync {
    /// Read a record, `None` when the key is absent
    fn get(&self, namespace: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Write a record, replacing any previous value
    fn put(&self, namespace: &str, id: &str, value: &Value) -> StoreResult<()>;

    /// Remove a record; returns whether a record existed
    fn delete(&self, namespace: &str, id: &str) -> StoreResult<bool>;

    /// Read every record in a namespace, ordered by id
    fn scan(&self, namespace: &str) -> StoreResult<Vec<Value>>;
}
