//! # Session Entities
//!
//! The session never holds a copy of the account. It remembers which account
//! is signed in; the principal is always re-read from the directory.

use serde::{Deserialize, Serialize};
use shared_types::AccountId;

/// Key under which the session record is persisted.
pub const SESSION_KEY: &[u8] = b"session-principal";

/// Session lifecycle.
///
/// ```text
/// Loading         ──bootstrap──→ Unauthenticated | Authenticated (restored)
/// Unauthenticated ──login──────→ Authenticating
/// Authenticating  ──ok─────────→ Authenticated
/// Authenticating  ──failure────→ previous state
/// Authenticated   ──logout─────→ Unauthenticated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Persisted session not yet inspected.
    #[default]
    Loading,
    Unauthenticated,
    /// Credentials are being checked.
    Authenticating,
    Authenticated { account_id: AccountId },
}

impl SessionState {
    pub fn account_id(&self) -> Option<AccountId> {
        match self {
            SessionState::Authenticated { account_id } => Some(*account_id),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

/// Persisted form of an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub account_id: AccountId,
}

impl SessionRecord {
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// `None` for anything that is not a well-formed record.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }
}
