//! # Identity Errors
//!
//! Typed failures of the two operations with a business outcome: `login`
//! and `register`.

use thiserror::Error;

/// Why a login attempt did not produce a session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No account matches the email and password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The credentials are correct but the account is blocked.
    #[error("Account is blocked")]
    AccountBlocked,
}

/// Why a self-service registration was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// Only borrowers and lenders may register themselves.
    #[error("Role cannot self-register: {0}")]
    InvalidRole(String),

    /// Another account already uses this email (compared case-insensitively).
    #[error("Email already registered")]
    EmailTaken,
}
