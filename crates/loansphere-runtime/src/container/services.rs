//! # Core Container
//!
//! Holds the two LoanSphere stores and the key-value store they share.
//!
//! ## Initialization Order
//!
//! ```text
//! 1. Key-value store (file or memory)
//! 2. Domain store (loads collections, seeds on first run)
//! 3. Identity store (directory over the domain store, session restored)
//! ```
//!
//! ## Thread Safety
//!
//! - The domain store sits behind `Arc<RwLock<..>>`, shared with the identity
//!   store's directory adapter
//! - The identity store sits behind its own `RwLock`
//! - Locks are never nested: identity operations take the domain lock only
//!   for the duration of one directory call

use std::sync::Arc;

use ls_01_identity::{DomainDirectory, IdentityApi, IdentityService, SessionState, SharedDomainStore};
use ls_02_domain_store::{DomainStoreApi, DomainStoreService, SharedKVStore, SystemClock};
use parking_lot::RwLock;
use shared_types::Principal;
use tracing::info;

use crate::adapters::RuntimeKVStore;
use crate::container::config::{RuntimeConfig, StorageBackend};

/// Handle shared by both stores.
pub type CoreKVStore = SharedKVStore<RuntimeKVStore>;

/// Concrete domain store type.
pub type CoreDomainStore = DomainStoreService<CoreKVStore, SystemClock>;

/// Concrete identity store type.
pub type CoreIdentity = IdentityService<DomainDirectory<CoreDomainStore>, CoreKVStore>;

/// Counts reported after boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSummary {
    pub storage: StorageBackend,
    pub accounts: usize,
    pub loans: usize,
    pub offers: usize,
    pub transactions: usize,
    pub activity_entries: usize,
    pub unread_notifications: usize,
    pub session: SessionState,
    pub persist_failures: u64,
}

/// The assembled core.
pub struct CoreContainer {
    pub domain: SharedDomainStore<CoreDomainStore>,
    pub identity: Arc<RwLock<CoreIdentity>>,
    kv: CoreKVStore,
    config: RuntimeConfig,
}

impl CoreContainer {
    /// Opens storage, loads the domain store and restores the session.
    pub fn new(config: RuntimeConfig) -> Self {
        info!(storage = %config.storage, "Creating LoanSphere core");

        let kv = SharedKVStore::new(RuntimeKVStore::open(&config));
        let domain_store = DomainStoreService::new(kv.clone(), SystemClock, config.store.clone());
        let domain = Arc::new(RwLock::new(domain_store));

        let mut identity = IdentityService::new(DomainDirectory::new(Arc::clone(&domain)), kv.clone());
        let session = identity.bootstrap();
        info!(?session, "Core ready");

        Self {
            domain,
            identity: Arc::new(RwLock::new(identity)),
            kv,
            config,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The shared key-value store handle.
    pub fn kv_store(&self) -> &CoreKVStore {
        &self.kv
    }

    /// The signed-in principal, if any.
    pub fn current_principal(&self) -> Option<Principal> {
        self.identity.read().current_principal()
    }

    pub fn summary(&self) -> CoreSummary {
        let session = self.identity.read().session_state();
        let domain = self.domain.read();

        CoreSummary {
            storage: self.config.storage,
            accounts: domain.accounts().len(),
            loans: domain.loans().len(),
            offers: domain.offers().len(),
            transactions: domain.transactions().len(),
            activity_entries: domain.activity_log().len(),
            unread_notifications: domain.unread_notification_count(),
            session,
            persist_failures: domain.persist_failures(),
        }
    }
}
