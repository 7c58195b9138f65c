//! # Domain Layer
//!
//! Session state and identity errors.

pub mod entities;
pub mod errors;
