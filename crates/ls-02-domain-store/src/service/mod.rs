//! # Domain Store Service
//!
//! The main service implementing `DomainStoreApi`.
//!
//! ## Architecture
//!
//! This service:
//! 1. Loads the six collections from the key-value store at construction,
//!    falling back to the demo dataset for any key that is absent or unreadable
//! 2. Applies mutations in memory, then records their audit trail
//! 3. Persists exactly the touched collections in one atomic batch
//!
//! Persistence failures never undo an in-memory mutation. They are logged and
//! counted, and the next successful write of that collection catches up.

mod api;
mod helpers;

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::adapters::serializer::decode_collection;
use crate::domain::collections::Collections;
use crate::domain::errors::PersistenceError;
use crate::domain::ids::IdAllocator;
use crate::domain::value_objects::{CollectionKey, StoreConfig};
use crate::ports::outbound::{Clock, KeyValueStore};

/// The Domain Store Service.
pub struct DomainStoreService<KV, C>
where
    KV: KeyValueStore,
    C: Clock,
{
    /// Key-value store for persistence.
    pub(crate) kv_store: KV,
    /// Clock for dates, time labels and ids.
    pub(crate) clock: C,
    /// Service configuration.
    pub(crate) config: StoreConfig,
    /// The canonical in-memory collections.
    pub(crate) state: Collections,
    /// Account, loan and offer id source.
    pub(crate) ids: IdAllocator,
    /// Batches the key-value store rejected since construction.
    pub(crate) persist_failures: u64,
}

impl<KV, C> DomainStoreService<KV, C>
where
    KV: KeyValueStore,
    C: Clock,
{
    /// Create a new service over `kv_store`.
    ///
    /// Every collection that is absent or fails to decode is replaced by its
    /// seed contents (or left empty when `seed_on_first_run` is off) and
    /// written back immediately.
    pub fn new(kv_store: KV, clock: C, config: StoreConfig) -> Self {
        let mut service = Self {
            kv_store,
            clock,
            config,
            state: Collections::empty(),
            ids: IdAllocator::new(),
            persist_failures: 0,
        };

        let fallback = service.load_collections();
        if !fallback.is_empty() {
            info!(collections = ?fallback, "Initialised collections from defaults");
            service.persist(&fallback);
        }

        service
    }

    /// The in-memory collections.
    pub fn collections(&self) -> &Collections {
        &self.state
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of persistence batches that failed.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures
    }

    /// Encodes all six collections exactly as they are persisted.
    pub fn export_snapshot(&self) -> Result<BTreeMap<CollectionKey, Vec<u8>>, PersistenceError> {
        CollectionKey::ALL
            .iter()
            .map(|key| Ok((*key, self.encode(*key)?)))
            .collect()
    }

    /// Loads every collection; returns the keys that fell back to defaults.
    fn load_collections(&mut self) -> Vec<CollectionKey> {
        let defaults = if self.config.seed_on_first_run {
            Collections::seeded()
        } else {
            Collections::empty()
        };
        let mut fallback = Vec::new();

        macro_rules! load {
            ($key:expr, $field:ident) => {
                match self.read_key($key) {
                    Some(records) => self.state.$field = records,
                    None => {
                        self.state.$field = defaults.$field.clone();
                        fallback.push($key);
                    }
                }
            };
        }

        load!(CollectionKey::Accounts, accounts);
        load!(CollectionKey::Loans, loans);
        load!(CollectionKey::Offers, offers);
        load!(CollectionKey::Transactions, transactions);
        load!(CollectionKey::ActivityLog, activity_log);
        load!(CollectionKey::Notifications, notifications);

        self.state.activity_log.truncate(self.config.max_activity_entries);
        self.state.notifications.truncate(self.config.max_notifications);

        fallback
    }

    fn read_key<T: serde::de::DeserializeOwned>(&self, key: CollectionKey) -> Option<Vec<T>> {
        match self.kv_store.get(key.as_bytes()) {
            Ok(Some(bytes)) => match decode_collection(key, &bytes) {
                Ok(records) => Some(records),
                Err(e) => {
                    warn!(key = %key, error = %e, "Unreadable collection, using defaults");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                debug!(key = %key, error = %e, "Failed to read collection");
                None
            }
        }
    }
}
