//! Serializer Adapters
//!
//! JSON encoding of persisted collections.

mod json;

pub use self::json::{decode_collection, encode_collection};
