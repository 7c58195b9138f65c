//! # Directory Entities
//!
//! Defines the account entities shared between the identity store and the
//! domain store.
//!
//! ## Clusters
//!
//! - **Directory**: `Account`, `AccountId`, `Role`, `AccountStatus`
//! - **Session**: `Principal`
//! - **Commands**: `NewAccount`, `ProfileUpdate`

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::credentials::PasswordSecret;
use crate::errors::{UnknownRole, UnknownStatus};

// =============================================================================
// CLUSTER A: THE DIRECTORY
// =============================================================================

/// Identifier of an account in the directory.
///
/// Assigned once at creation and never reused while the account exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four LoanSphere roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Lender,
    Borrower,
    Analyst,
}

impl Role {
    /// All roles, in directory display order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Lender, Role::Borrower, Role::Analyst];

    /// Lowercase wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Lender => "lender",
            Role::Borrower => "borrower",
            Role::Analyst => "analyst",
        }
    }

    /// Only borrowers and lenders may create their own account.
    pub fn can_self_register(&self) -> bool {
        matches!(self, Role::Borrower | Role::Lender)
    }

    /// Analysts observe every collection but never mutate.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Role::Analyst)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Parses an exact lowercase role name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "lender" => Ok(Role::Lender),
            "borrower" => Ok(Role::Borrower),
            "analyst" => Ok(Role::Analyst),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Whether an account may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccountStatus {
    #[default]
    Active,
    Blocked,
}

impl AccountStatus {
    /// Returns the opposite status (the admin "block/unblock" switch).
    pub fn toggled(self) -> Self {
        match self {
            AccountStatus::Active => AccountStatus::Blocked,
            AccountStatus::Blocked => AccountStatus::Active,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Active => f.write_str("Active"),
            AccountStatus::Blocked => f.write_str("Blocked"),
        }
    }
}

impl FromStr for AccountStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(AccountStatus::Active),
            "Blocked" => Ok(AccountStatus::Blocked),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Role-specific attributes such as a lender's `totalCapital`.
///
/// Kept as an ordered map so the persisted form is deterministic.
pub type AccountExtra = BTreeMap<String, serde_json::Value>;

/// Persisted field names of [`Account`]. `extra` is flattened next to them,
/// so these keys are never accepted as attributes.
pub const RESERVED_ACCOUNT_KEYS: [&str; 6] =
    ["id", "name", "email", "passwordSecret", "role", "status"];

pub fn is_reserved_account_key(key: &str) -> bool {
    RESERVED_ACCOUNT_KEYS.contains(&key)
}

fn merge_extra<'a>(
    target: &mut AccountExtra,
    source: impl IntoIterator<Item = (&'a String, &'a serde_json::Value)>,
) {
    for (key, value) in source {
        if !is_reserved_account_key(key) {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// An entry of the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    /// Absent for accounts created by an administrator without a password;
    /// such accounts cannot sign in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_secret: Option<PasswordSecret>,
    pub role: Role,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(flatten)]
    pub extra: AccountExtra,
}

impl Account {
    /// Case-insensitive email comparison used for uniqueness checks.
    pub fn email_matches_ignore_case(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    /// True when a password is set and matches.
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_secret
            .as_ref()
            .is_some_and(|secret| secret.verify(password))
    }

    pub fn is_blocked(&self) -> bool {
        self.status == AccountStatus::Blocked
    }

    /// Merges a profile update into this account.
    pub fn apply_profile(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(password) = &update.password {
            self.password_secret = Some(PasswordSecret::derive(password));
        }
        merge_extra(&mut self.extra, &update.extra);
    }
}

// =============================================================================
// CLUSTER B: THE SESSION
// =============================================================================

/// The authenticated identity handed to the view layer.
///
/// Everything an `Account` holds except its password secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    #[serde(flatten)]
    pub extra: AccountExtra,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&Account> for Principal {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            status: account.status,
            extra: account.extra.clone(),
        }
    }
}

// =============================================================================
// CLUSTER C: COMMANDS
// =============================================================================

/// Input for creating an account (registration or admin "add user").
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Role,
    pub extra: AccountExtra,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: None,
            role,
            extra: AccountExtra::new(),
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Adds a role-specific attribute. Reserved keys are ignored.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let key = key.into();
        if !is_reserved_account_key(&key) {
            self.extra.insert(key, value);
        }
        self
    }

    /// Materializes the account under the given id, always `Active`.
    pub fn into_account(self, id: AccountId) -> Account {
        let mut extra = AccountExtra::new();
        merge_extra(&mut extra, &self.extra);
        Account {
            id,
            name: self.name,
            email: self.email,
            password_secret: self.password.as_deref().map(PasswordSecret::derive),
            role: self.role,
            status: AccountStatus::Active,
            extra,
        }
    }
}

/// Partial profile fields merged by "update profile".
///
/// Role and status are deliberately absent; those belong to administration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub extra: AccountExtra,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none() && self.extra.is_empty()
    }
}
