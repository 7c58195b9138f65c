//! # Core Container
//!
//! Configuration and lifetime of the identity and domain stores.

pub mod config;
pub mod services;

pub use config::{ConfigError, RuntimeConfig, StorageBackend, STORE_FILE_NAME};
pub use services::{CoreContainer, CoreDomainStore, CoreIdentity, CoreKVStore, CoreSummary};
