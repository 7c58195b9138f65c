//! # Adapters Layer
//!
//! - `directory` - `AccountDirectory` over the shared domain store

pub mod directory;

pub use directory::{DomainDirectory, SharedDomainStore};
