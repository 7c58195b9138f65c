//! # Adapters
//!
//! Concrete implementations of the outbound ports.
//!
//! - `storage` - Key-value stores (in-memory, file-backed, shared handle)
//! - `infra` - Clocks
//! - `serializer` - JSON encoding of persisted collections

pub mod infra;
pub mod serializer;
pub mod storage;

pub use infra::{FixedClock, SystemClock};
pub use serializer::{decode_collection, encode_collection};
pub use storage::{FileBackedKVStore, InMemoryKVStore, SharedKVStore};
