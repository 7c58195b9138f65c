//! # LoanSphere Runtime Library
//!
//! Assembles the core for a host application (the view layer) and for the
//! `loansphere-runtime` binary.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install logging
//! 3. Open the key-value store (file or memory)
//! 4. Load the domain store, seeding absent collections
//! 5. Restore the persisted session

pub mod adapters;
pub mod container;

pub use adapters::RuntimeKVStore;
pub use container::{
    ConfigError, CoreContainer, CoreDomainStore, CoreIdentity, CoreKVStore, CoreSummary,
    RuntimeConfig, StorageBackend,
};
