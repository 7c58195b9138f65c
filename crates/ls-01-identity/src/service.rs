//! # Identity Service
//!
//! Application service implementing `IdentityApi`.
//!
//! ## Architecture
//!
//! - Credentials and profiles are read from and written to an
//!   `AccountDirectory` (the domain store's account collection)
//! - Only the signed-in account id is kept, in memory and under
//!   `session-principal` in the key-value store
//! - Every principal handed out is derived from the directory at call time

use ls_02_domain_store::KeyValueStore;
use shared_types::{NewAccount, Principal, ProfileUpdate, Role};
use tracing::{debug, info, warn};

use crate::domain::entities::{SessionRecord, SessionState, SESSION_KEY};
use crate::domain::errors::{AuthError, RegistrationError};
use crate::ports::inbound::IdentityApi;
use crate::ports::outbound::AccountDirectory;

/// Identity & Session Service.
pub struct IdentityService<D, KV>
where
    D: AccountDirectory,
    KV: KeyValueStore,
{
    directory: D,
    kv_store: KV,
    state: SessionState,
}

impl<D, KV> IdentityService<D, KV>
where
    D: AccountDirectory,
    KV: KeyValueStore,
{
    /// Creates a service in the `Loading` state. Call `bootstrap` before use.
    pub fn new(directory: D, kv_store: KV) -> Self {
        Self {
            directory,
            kv_store,
            state: SessionState::Loading,
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    fn ensure_ready(&self, operation: &str) {
        assert!(
            self.state != SessionState::Loading,
            "identity store used before bootstrap: {operation}"
        );
    }

    fn persist_session(&mut self, record: SessionRecord) {
        let result = record
            .encode()
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                self.kv_store
                    .put(SESSION_KEY, &bytes)
                    .map_err(|e| e.to_string())
            });
        if let Err(error) = result {
            warn!(account_id = %record.account_id, %error, "Failed to persist session");
        }
    }

    fn clear_persisted_session(&mut self) {
        if let Err(e) = self.kv_store.delete(SESSION_KEY) {
            warn!(error = %e, "Failed to clear persisted session");
        }
    }

    fn restore(&mut self) -> SessionState {
        let bytes = match self.kv_store.get(SESSION_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return SessionState::Unauthenticated,
            Err(e) => {
                warn!(error = %e, "Could not read persisted session");
                return SessionState::Unauthenticated;
            }
        };

        let Some(record) = SessionRecord::decode(&bytes) else {
            warn!("Discarding malformed session record");
            self.clear_persisted_session();
            return SessionState::Unauthenticated;
        };

        match self.directory.account(record.account_id) {
            Some(account) if !account.is_blocked() => SessionState::Authenticated {
                account_id: account.id,
            },
            Some(_) => {
                info!(account_id = %record.account_id, "Session account is blocked, signing out");
                self.clear_persisted_session();
                SessionState::Unauthenticated
            }
            None => {
                info!(account_id = %record.account_id, "Session account no longer exists");
                self.clear_persisted_session();
                SessionState::Unauthenticated
            }
        }
    }
}

impl<D, KV> IdentityApi for IdentityService<D, KV>
where
    D: AccountDirectory,
    KV: KeyValueStore,
{
    fn bootstrap(&mut self) -> SessionState {
        if self.state != SessionState::Loading {
            debug!(state = ?self.state, "Session already bootstrapped");
            return self.state;
        }

        self.state = self.restore();
        info!(state = ?self.state, "Session bootstrapped");
        self.state
    }

    fn login(&mut self, email: &str, password: &str) -> Result<Principal, AuthError> {
        self.ensure_ready("login");
        let previous = self.state;
        self.state = SessionState::Authenticating;

        let outcome = match self.directory.find_by_credentials(email, password) {
            Some(account) if account.is_blocked() => Err(AuthError::AccountBlocked),
            Some(account) => Ok(account),
            None => Err(AuthError::InvalidCredentials),
        };

        match outcome {
            Ok(account) => {
                self.state = SessionState::Authenticated {
                    account_id: account.id,
                };
                self.persist_session(SessionRecord {
                    account_id: account.id,
                });
                info!(account_id = %account.id, role = %account.role, "Login succeeded");
                Ok(Principal::from(&account))
            }
            Err(e) => {
                self.state = previous;
                warn!(email, error = %e, "Login rejected");
                Err(e)
            }
        }
    }

    fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<(), RegistrationError> {
        self.ensure_ready("register");

        let role = match role.parse::<Role>() {
            Ok(role) if role.can_self_register() => role,
            _ => return Err(RegistrationError::InvalidRole(role.to_string())),
        };
        if self.directory.email_taken(email) {
            debug!(email, "Registration refused, email in use");
            return Err(RegistrationError::EmailTaken);
        }

        let account = NewAccount::new(name, email, role).with_password(password);
        let created = self
            .directory
            .register(account)
            .ok_or(RegistrationError::EmailTaken)?;

        info!(account_id = %created.id, role = %role, "Account registered");
        Ok(())
    }

    fn logout(&mut self) {
        self.ensure_ready("logout");
        if let Some(account_id) = self.state.account_id() {
            info!(account_id = %account_id, "Logged out");
        }
        self.state = SessionState::Unauthenticated;
        self.clear_persisted_session();
    }

    fn update_profile(&mut self, update: &ProfileUpdate) -> Option<Principal> {
        self.ensure_ready("update_profile");
        let principal = self.current_principal()?;
        self.directory
            .update_profile(&principal, update)
            .map(|account| Principal::from(&account))
    }

    fn current_principal(&self) -> Option<Principal> {
        let account_id = self.state.account_id()?;
        self.directory
            .account(account_id)
            .map(|account| Principal::from(&account))
    }

    fn is_session_loading(&self) -> bool {
        self.state == SessionState::Loading
    }

    fn session_state(&self) -> SessionState {
        self.state
    }
}
