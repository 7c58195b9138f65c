//! # Ports Layer
//!
//! Inbound (driving) and outbound (driven) ports for the identity store.

pub mod inbound;
pub mod outbound;
