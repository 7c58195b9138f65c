//! # Password Secrets
//!
//! Accounts never hold a plaintext password. A `PasswordSecret` is an
//! HMAC-SHA256 of the password keyed by a per-account salt, stored as
//! `hmac-sha256$<salt>$<hex digest>`.

use std::fmt;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "hmac-sha256";

/// A salted, keyed digest of an account password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordSecret(String);

impl PasswordSecret {
    /// Derives a secret under a fresh random salt.
    pub fn derive(password: &str) -> Self {
        Self::derive_with_salt(password, &Uuid::new_v4().simple().to_string())
    }

    /// Derives a secret under a caller-chosen salt.
    ///
    /// Seed accounts use fixed salts so the seed dataset is reproducible.
    pub fn derive_with_salt(password: &str, salt: &str) -> Self {
        let digest = hex::encode(Self::mac(salt, password).finalize().into_bytes());
        Self(format!("{SCHEME}${salt}${digest}"))
    }

    /// Constant-time check of `password` against this secret.
    ///
    /// Malformed secrets never verify.
    pub fn verify(&self, password: &str) -> bool {
        let mut parts = self.0.splitn(3, '$');
        let (Some(SCHEME), Some(salt), Some(digest)) = (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        let Ok(expected) = hex::decode(digest) else {
            return false;
        };
        Self::mac(salt, password).verify_slice(&expected).is_ok()
    }

    fn mac(salt: &str, password: &str) -> HmacSha256 {
        // HMAC accepts keys of any length
        let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC key length is unrestricted"));
        mac.update(password.as_bytes());
        mac
    }
}

impl fmt::Debug for PasswordSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordSecret(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_and_verify() {
        let secret = PasswordSecret::derive("password");
        assert!(secret.verify("password"));
        assert!(!secret.verify("Password"));
        assert!(!secret.verify(""));
    }

    #[test]
    fn test_random_salts_differ() {
        let a = PasswordSecret::derive("password");
        let b = PasswordSecret::derive("password");
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_salt_is_deterministic() {
        let a = PasswordSecret::derive_with_salt("password", "seed-1");
        let b = PasswordSecret::derive_with_salt("password", "seed-1");
        assert_eq!(a, b);
        assert!(a.verify("password"));
    }

    #[test]
    fn test_malformed_secret_never_verifies() {
        let secret: PasswordSecret = serde_json::from_str("\"password\"").unwrap();
        assert!(!secret.verify("password"));

        let secret: PasswordSecret = serde_json::from_str("\"hmac-sha256$salt$zz\"").unwrap();
        assert!(!secret.verify("password"));
    }

    #[test]
    fn test_debug_hides_digest() {
        let secret = PasswordSecret::derive("password");
        assert_eq!(format!("{:?}", secret), "PasswordSecret(..)");
    }
}
