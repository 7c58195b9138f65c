//! # Shared Types Crate
//!
//! This crate contains the directory entities (`Account`, `Principal`) and the
//! small value types every LoanSphere subsystem agrees on.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Secrets Stay Put**: An `Account` carries a `PasswordSecret`; a
//!   `Principal` never does.
//! - **Lenient Numbers**: User-entered amounts are coerced with
//!   [`Numeric::parse_float`] and may hold NaN. Nothing here rejects them.

pub mod credentials;
pub mod entities;
pub mod errors;
pub mod numeric;

pub use credentials::PasswordSecret;
pub use entities::*;
pub use errors::*;
pub use numeric::{format_amount, Numeric};
