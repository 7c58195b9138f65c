//! Test fixtures: the two stores over one in-memory key-value store.

use std::sync::Arc;

use ls_01_identity::{DomainDirectory, IdentityApi, IdentityService, SharedDomainStore};
use ls_02_domain_store::{
    DomainStoreApi, DomainStoreService, FixedClock, InMemoryKVStore, SharedKVStore, StoreConfig,
    SEED_PASSWORD,
};
use parking_lot::RwLock;
use shared_types::Principal;

pub type Kv = SharedKVStore<InMemoryKVStore>;
pub type Store = DomainStoreService<Kv, FixedClock>;
pub type Identity = IdentityService<DomainDirectory<Store>, Kv>;

pub const ADMIN_EMAIL: &str = "admin@loansphere.com";
pub const LENDER_EMAIL: &str = "lender@loansphere.com";
pub const BORROWER_EMAIL: &str = "borrower@loansphere.com";
pub const ANALYST_EMAIL: &str = "analyst@loansphere.com";

pub struct Core {
    pub kv: Kv,
    pub store: SharedDomainStore<Store>,
    pub identity: Identity,
}

impl Core {
    /// Seeded core with the session bootstrapped.
    pub fn seeded() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Core with every collection empty.
    pub fn empty() -> Self {
        Self::with_config(StoreConfig::default().with_seed_on_first_run(false))
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self::over(SharedKVStore::new(InMemoryKVStore::new()), config)
    }

    /// Core over an existing key-value store, as after a restart.
    pub fn over(kv: Kv, config: StoreConfig) -> Self {
        let store = DomainStoreService::new(kv.clone(), FixedClock::default(), config);
        let store = Arc::new(RwLock::new(store));
        let mut identity = IdentityService::new(DomainDirectory::new(Arc::clone(&store)), kv.clone());
        identity.bootstrap();
        Self { kv, store, identity }
    }

    /// Logs in with the seed password.
    pub fn login_seeded(&mut self, email: &str) -> Principal {
        self.identity
            .login(email, SEED_PASSWORD)
            .unwrap_or_else(|e| panic!("login {email}: {e}"))
    }

    /// Principal of `email` without touching the session.
    pub fn principal(&self, email: &str) -> Principal {
        let store = self.store.read();
        let account = store
            .find_by_email(email)
            .unwrap_or_else(|| panic!("no account {email}"));
        Principal::from(account)
    }

    /// Registers and returns the new account's principal.
    pub fn register(&mut self, name: &str, email: &str, role: &str) -> Principal {
        self.identity
            .register(name, email, "pw", role)
            .unwrap_or_else(|e| panic!("register {email}: {e}"));
        self.principal(email)
    }
}
