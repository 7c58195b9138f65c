//! # Domain Store Directory Adapter
//!
//! Implements [`AccountDirectory`] over the shared domain store, so the
//! account collection has exactly one owner.

use std::sync::Arc;

use ls_02_domain_store::DomainStoreApi;
use parking_lot::RwLock;
use shared_types::{Account, AccountId, NewAccount, Principal, ProfileUpdate};

use crate::ports::outbound::AccountDirectory;

/// Handle to a domain store shared between the identity store and the view
/// layer.
pub type SharedDomainStore<S> = Arc<RwLock<S>>;

/// Account directory backed by the domain store's account collection.
pub struct DomainDirectory<S> {
    store: SharedDomainStore<S>,
}

impl<S> DomainDirectory<S> {
    pub fn new(store: SharedDomainStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SharedDomainStore<S> {
        &self.store
    }
}

impl<S> Clone for DomainDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> AccountDirectory for DomainDirectory<S>
where
    S: DomainStoreApi + Send + Sync,
{
    fn find_by_credentials(&self, email: &str, password: &str) -> Option<Account> {
        self.store.read().find_by_credentials(email, password).cloned()
    }

    fn email_taken(&self, email: &str) -> bool {
        self.store.read().email_taken(email)
    }

    fn account(&self, id: AccountId) -> Option<Account> {
        self.store.read().account(id).cloned()
    }

    fn register(&self, account: NewAccount) -> Option<Account> {
        self.store.write().register_account(account)
    }

    fn update_profile(&self, actor: &Principal, update: &ProfileUpdate) -> Option<Account> {
        self.store.write().update_profile(actor, update)
    }
}
