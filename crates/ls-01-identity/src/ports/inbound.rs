//! # Inbound Ports (Driving Ports / API)
//!
//! The identity API consumed by the view layer.

use shared_types::{Principal, ProfileUpdate};

use crate::domain::entities::SessionState;
use crate::domain::errors::{AuthError, RegistrationError};

/// Primary Identity & Session API.
///
/// The mutating operations panic when called before `bootstrap`.
pub trait IdentityApi {
    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Restores the persisted session, if any.
    ///
    /// Malformed records, missing accounts and blocked accounts all end in
    /// `Unauthenticated`; startup never fails.
    fn bootstrap(&mut self) -> SessionState;

    /// Signs in with an exact (case-sensitive) email match.
    fn login(&mut self, email: &str, password: &str) -> Result<Principal, AuthError>;

    /// Creates an `Active` borrower or lender account. Does not sign in.
    fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<(), RegistrationError>;

    /// Ends the session. Idempotent.
    fn logout(&mut self);

    /// Merges `update` into the signed-in account.
    ///
    /// Returns the refreshed principal, or `None` when nobody is signed in.
    fn update_profile(&mut self, update: &ProfileUpdate) -> Option<Principal>;

    // =========================================================================
    // Queries
    // =========================================================================

    /// The signed-in principal, read fresh from the directory.
    fn current_principal(&self) -> Option<Principal>;

    /// True until `bootstrap` has run.
    fn is_session_loading(&self) -> bool;

    fn session_state(&self) -> SessionState;
}
