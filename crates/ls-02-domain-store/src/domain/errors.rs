//! # Domain Errors
//!
//! Error types for the persistence side of the domain store.
//!
//! Business-rule violations (missing ids, bad role strings, non-numeric
//! amounts) are not errors here: mutations degrade to no-ops or NaN-bearing
//! records. Only the storage layer reports failures, and the service logs
//! them instead of propagating.

use thiserror::Error;

use super::value_objects::CollectionKey;

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl From<std::io::Error> for KVStoreError {
    fn from(err: std::io::Error) -> Self {
        KVStoreError::IOError {
            message: err.to_string(),
        }
    }
}

/// Failure to write a snapshot of one or more collections.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// The backing store rejected the batch.
    #[error("Failed to persist collections: {0}")]
    Store(#[from] KVStoreError),

    /// A collection could not be encoded.
    #[error("Failed to encode {key}: {message}")]
    Encode { key: CollectionKey, message: String },
}
