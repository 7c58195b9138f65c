//! # Runtime Storage
//!
//! One concrete key-value store type for both backends, so the container's
//! service types do not depend on the configuration.

use ls_02_domain_store::{
    BatchOperation, FileBackedKVStore, InMemoryKVStore, KVStoreError, KeyValueStore,
};
use tracing::info;

use crate::container::config::{RuntimeConfig, StorageBackend};

/// The backend chosen by `LS_STORAGE`.
pub enum RuntimeKVStore {
    File(FileBackedKVStore),
    InMemory(InMemoryKVStore),
}

impl RuntimeKVStore {
    /// Opens the backend described by `config`.
    pub fn open(config: &RuntimeConfig) -> Self {
        match config.storage {
            StorageBackend::File => {
                let path = config.store_path();
                info!(path = %path.display(), "Using file storage");
                RuntimeKVStore::File(FileBackedKVStore::new(path))
            }
            StorageBackend::InMemory => {
                info!("Using in-memory storage; nothing will be kept on exit");
                RuntimeKVStore::InMemory(InMemoryKVStore::new())
            }
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            RuntimeKVStore::File(_) => StorageBackend::File,
            RuntimeKVStore::InMemory(_) => StorageBackend::InMemory,
        }
    }

    fn inner(&self) -> &dyn KeyValueStore {
        match self {
            RuntimeKVStore::File(store) => store,
            RuntimeKVStore::InMemory(store) => store,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn KeyValueStore {
        match self {
            RuntimeKVStore::File(store) => store,
            RuntimeKVStore::InMemory(store) => store,
        }
    }
}

impl KeyValueStore for RuntimeKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner().get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.inner_mut().put(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.inner_mut().delete(key)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.inner_mut().atomic_batch_write(operations)
    }
}
