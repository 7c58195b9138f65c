use crate::domain::errors::{KVStoreError, PersistenceError};
use crate::domain::value_objects::CollectionKey;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Compact JSON array of the collection's records.
pub fn encode_collection<T: Serialize>(
    key: CollectionKey,
    records: &[T],
) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec(records).map_err(|e| PersistenceError::Encode {
        key,
        message: e.to_string(),
    })
}

/// Decodes a persisted collection. Bytes that are not a valid array of
/// records are reported as `CorruptionError`.
pub fn decode_collection<T: DeserializeOwned>(
    key: CollectionKey,
    bytes: &[u8],
) -> Result<Vec<T>, KVStoreError> {
    serde_json::from_slice(bytes).map_err(|e| KVStoreError::CorruptionError {
        message: format!("{key}: {e}"),
    })
}
