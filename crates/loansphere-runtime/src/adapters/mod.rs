//! # Runtime Adapters
//!
//! - `storage` - Backend selected at startup from `RuntimeConfig`

pub mod storage;

pub use storage::RuntimeKVStore;
