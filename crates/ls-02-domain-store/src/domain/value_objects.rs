//! # Value Objects
//!
//! Configuration and persisted-key types for the domain store.

use std::fmt;

/// Configuration for the domain store.
///
/// All configuration values have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum activity log entries kept (default: 1000).
    ///
    /// The log is prepended; the oldest entries fall off the end.
    pub max_activity_entries: usize,

    /// Maximum notifications kept (default: 200).
    pub max_notifications: usize,

    /// Seed absent or unreadable collections with the demo dataset
    /// (default: true). When `false` they start empty.
    pub seed_on_first_run: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_activity_entries: 1000,
            max_notifications: 200,
            seed_on_first_run: true,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_activity_entries(mut self, max: usize) -> Self {
        self.max_activity_entries = max;
        self
    }

    pub fn with_max_notifications(mut self, max: usize) -> Self {
        self.max_notifications = max;
        self
    }

    pub fn with_seed_on_first_run(mut self, seed: bool) -> Self {
        self.seed_on_first_run = seed;
        self
    }
}

/// The six persisted collections, one key each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionKey {
    Accounts,
    Loans,
    Offers,
    Transactions,
    ActivityLog,
    Notifications,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 6] = [
        CollectionKey::Accounts,
        CollectionKey::Loans,
        CollectionKey::Offers,
        CollectionKey::Transactions,
        CollectionKey::ActivityLog,
        CollectionKey::Notifications,
    ];

    /// Storage key of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Accounts => "accounts",
            CollectionKey::Loans => "loans",
            CollectionKey::Offers => "offers",
            CollectionKey::Transactions => "transactions",
            CollectionKey::ActivityLog => "activity-log",
            CollectionKey::Notifications => "notifications",
        }
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        self.as_str().as_bytes()
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
