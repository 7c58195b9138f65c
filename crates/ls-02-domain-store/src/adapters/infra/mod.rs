//! Infrastructure Adapters
//!
//! Implementations of the `Clock` trait.

mod time;

pub use time::{FixedClock, SystemClock};
