//! # Outbound Ports (Driven Ports)
//!
//! The identity store owns no accounts. It reads and writes them through an
//! [`AccountDirectory`], normally backed by the domain store.

use shared_types::{Account, AccountId, NewAccount, Principal, ProfileUpdate};

/// Account lookups and writes needed by the identity store.
pub trait AccountDirectory: Send + Sync {
    /// Account matching `email` exactly (case-sensitive) whose password is
    /// `password`.
    fn find_by_credentials(&self, email: &str, password: &str) -> Option<Account>;

    /// Case-insensitive uniqueness check.
    fn email_taken(&self, email: &str) -> bool;

    fn account(&self, id: AccountId) -> Option<Account>;

    /// Inserts a new account; `None` when the email is already in use.
    fn register(&self, account: NewAccount) -> Option<Account>;

    /// Merges `update` into `actor`'s account.
    fn update_profile(&self, actor: &Principal, update: &ProfileUpdate) -> Option<Account>;
}
