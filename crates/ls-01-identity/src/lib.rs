//! # LoanSphere Identity & Session Store (ls-01)
//!
//! Authenticates principals, keeps the current session and handles
//! self-service registration for borrowers and lenders.
//!
//! ## Single Account Copy
//!
//! The identity store never holds an account of its own. The session is the
//! signed-in account id; credentials, profile edits and registrations all go
//! through an [`AccountDirectory`], which in production is the domain
//! store's account collection ([`DomainDirectory`]).
//!
//! ## Session Lifecycle
//!
//! | From | Event | To |
//! |------|-------|----|
//! | Loading | bootstrap, valid record | Authenticated |
//! | Loading | bootstrap, absent/malformed/blocked | Unauthenticated |
//! | Unauthenticated | login | Authenticating |
//! | Authenticating | credentials accepted | Authenticated |
//! | Authenticating | credentials refused | previous state |
//! | Authenticated | logout | Unauthenticated |
//!
//! Sessions never expire on their own.
//!
//! ## Usage
//!
//! ```ignore
//! let directory = DomainDirectory::new(Arc::clone(&domain_store));
//! let mut identity = IdentityService::new(directory, kv.clone());
//! identity.bootstrap();
//!
//! let principal = identity.login("lender@loansphere.com", "password")?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{DomainDirectory, SharedDomainStore};
pub use domain::entities::{SessionRecord, SessionState, SESSION_KEY};
pub use domain::errors::{AuthError, RegistrationError};
pub use ports::inbound::IdentityApi;
pub use ports::outbound::AccountDirectory;
pub use service::IdentityService;
