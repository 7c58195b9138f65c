//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the domain store.
//!
//! These are the interfaces the host application provides: a byte-oriented
//! key-value store for persistence and a clock for dates, time labels and id
//! allocation.

use crate::domain::errors::KVStoreError;

/// Abstract interface for key-value persistence.
///
/// Production: `FileBackedKVStore`
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key. Deleting an absent key succeeds.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Abstract interface for time (for testability).
pub trait Clock: Send + Sync {
    /// Today's date as `YYYY-MM-DD`.
    fn today(&self) -> String;

    /// Wall-clock label such as `09:05 AM`.
    fn time_label(&self) -> String;

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}
