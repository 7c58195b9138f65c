//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// A role string that does not name one of the four LoanSphere roles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

/// A status string that is neither `Active` nor `Blocked`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown account status: {0}")]
pub struct UnknownStatus(pub String);
