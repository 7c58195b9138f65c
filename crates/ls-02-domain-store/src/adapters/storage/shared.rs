use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one backing store.
///
/// The identity store and the domain store each own a `SharedKVStore`
/// pointing at the same underlying store, so the session record and the
/// collections land in one file.
pub struct SharedKVStore<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for SharedKVStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: KeyValueStore> SharedKVStore<T> {
    pub fn new(store: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access to the underlying store.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<T: KeyValueStore> KeyValueStore for SharedKVStore<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.lock().get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.inner.lock().put(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.inner.lock().delete(key)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.inner.lock().atomic_batch_write(operations)
    }
}
