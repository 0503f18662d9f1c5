//! Access/secret key credential

use crate::error::AuthError;
use bcrypt::Version;
use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use subtle::ConstantTimeEq;
use tessera_common::config::{
    ACCESS_KEY_MAX_LEN, ACCESS_KEY_MIN_LEN, SECRET_KEY_MAX_LEN, SECRET_KEY_MIN_LEN,
};
use tracing::error;

/// bcrypt work factor for secret key hashes
const HASH_COST: u32 = 10;

/// Check the access key length
pub(crate) const fn is_access_key_valid(access_key: &str) -> bool {
    access_key.len() >= ACCESS_KEY_MIN_LEN && access_key.len() <= ACCESS_KEY_MAX_LEN
}

/// Check the secret key length against an upper bound
pub(crate) const fn is_secret_key_valid(secret_key: &str, max_len: usize) -> bool {
    secret_key.len() >= SECRET_KEY_MIN_LEN && secret_key.len() <= max_len
}

/// Salted one-way hash of a secret key
#[derive(Clone)]
struct SecretKeyHash {
    salt: [u8; 16],
    digest: String,
}

impl SecretKeyHash {
    fn compute(secret_key: &str) -> Result<Self, AuthError> {
        let mut salt = [0u8; 16];
        OsRng.try_fill_bytes(&mut salt)?;
        let digest = bcrypt::hash_with_salt(secret_key, HASH_COST, salt)?
            .format_for_version(Version::TwoB);
        Ok(Self { salt, digest })
    }

    /// Hash `candidate` with the stored salt and compare digests in constant time
    fn matches(&self, candidate: &str) -> bool {
        match bcrypt::hash_with_salt(candidate, HASH_COST, self.salt) {
            Ok(parts) => parts
                .format_for_version(Version::TwoB)
                .as_bytes()
                .ct_eq(self.digest.as_bytes())
                .into(),
            Err(e) => {
                error!("Unable to hash candidate secret key: {}", e);
                false
            }
        }
    }
}

/// Server access credential
///
/// Credentials built by [`CredentialManager`](crate::CredentialManager)
/// carry their secret key hash from the start. Credentials deserialized
/// or built with [`Credential::from_parts`] compute it on first comparison.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    access_key: String,
    secret_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiry: Option<DateTime<Utc>>,
    #[serde(skip)]
    secret_key_hash: OnceLock<SecretKeyHash>,
}

impl Credential {
    /// Build a hashed credential; lengths must already be validated
    pub(crate) fn hashed(
        access_key: String,
        secret_key: String,
        expiry: Option<DateTime<Utc>>,
    ) -> Result<Self, AuthError> {
        let hash = SecretKeyHash::compute(&secret_key)?;
        Ok(Self {
            access_key,
            secret_key,
            expiry,
            secret_key_hash: OnceLock::from(hash),
        })
    }

    /// Build a credential without validation, e.g. from a client request
    ///
    /// The result may be invalid; an invalid credential never compares equal.
    pub fn from_parts(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        expiry: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            expiry,
            secret_key_hash: OnceLock::new(),
        }
    }

    /// Access key
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Secret key
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Expiry, if the credential is temporary
    pub const fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }

    /// Whether the credential has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|expiry| expiry <= now)
    }

    /// Check key lengths against the default bounds
    pub fn is_valid(&self) -> bool {
        self.is_valid_within(SECRET_KEY_MAX_LEN)
    }

    pub(crate) fn is_valid_within(&self, secret_key_max_len: usize) -> bool {
        is_access_key_valid(self.access_key.as_str())
            && is_secret_key_valid(self.secret_key.as_str(), secret_key_max_len)
    }

    /// Compare against a presented credential using the default bounds
    pub fn equals(&self, other: &Self) -> bool {
        self.equals_within(other, SECRET_KEY_MAX_LEN)
    }

    /// Compare against `other`, whose secret key is checked against this
    /// credential's hash rather than its plaintext
    pub(crate) fn equals_within(&self, other: &Self, secret_key_max_len: usize) -> bool {
        if !other.is_valid_within(secret_key_max_len) {
            return false;
        }
        let Some(hash) = self.secret_key_hash() else {
            return false;
        };

        let access_key_matches: bool = self
            .access_key
            .as_bytes()
            .ct_eq(other.access_key.as_bytes())
            .into();
        let secret_key_matches = hash.matches(&other.secret_key);
        access_key_matches & secret_key_matches
    }

    /// Cached hash, computed on first use
    ///
    /// Concurrent first calls may each hash the key; only one result is kept.
    fn secret_key_hash(&self) -> Option<&SecretKeyHash> {
        if let Some(hash) = self.secret_key_hash.get() {
            return Some(hash);
        }
        match SecretKeyHash::compute(&self.secret_key) {
            Ok(hash) => Some(self.secret_key_hash.get_or_init(|| hash)),
            Err(e) => {
                error!("Unable to generate hash of secret key: {}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn server_credential() -> Credential {
        Credential::hashed("admin".into(), "admin123".into(), None).unwrap()
    }

    #[test]
    fn test_is_valid() {
        assert!(Credential::from_parts("admin", "admin123", None).is_valid());
        assert!(!Credential::from_parts("min", "admin123", None).is_valid());
        assert!(!Credential::from_parts("a".repeat(21), "admin123", None).is_valid());
        assert!(!Credential::from_parts("admin", "admin12", None).is_valid());
        assert!(!Credential::from_parts("admin", "s".repeat(41), None).is_valid());
        assert!(Credential::from_parts("a".repeat(20), "s".repeat(40), None).is_valid());
    }

    #[test]
    fn test_equals() {
        let cred = server_credential();
        assert!(cred.equals(&Credential::from_parts("admin", "admin123", None)));
        assert!(!cred.equals(&Credential::from_parts("admin", "admin124", None)));
        assert!(!cred.equals(&Credential::from_parts("admia", "admin123", None)));
        // Invalid candidates are rejected before any hashing
        assert!(!cred.equals(&Credential::from_parts("admin", "short", None)));
        assert!(!cred.equals(&Credential::from_parts("", "", None)));
    }

    #[test]
    fn test_equals_is_idempotent() {
        let cred = server_credential();
        let candidate = Credential::from_parts("admin", "admin123", None);
        assert!(cred.equals(&candidate));
        assert!(cred.equals(&candidate));
        assert_eq!(cred.access_key(), "admin");
        assert_eq!(candidate.secret_key(), "admin123");
    }

    #[test]
    fn test_lazy_hash() {
        let cred = Credential::from_parts("admin", "admin123", None);
        assert!(cred.secret_key_hash.get().is_none());
        assert!(cred.equals(&Credential::from_parts("admin", "admin123", None)));
        assert!(cred.secret_key_hash.get().is_some());
    }

    #[test]
    fn test_hash_is_salted() {
        let a = SecretKeyHash::compute("admin123").unwrap();
        let b = SecretKeyHash::compute("admin123").unwrap();
        assert_ne!(a.digest, b.digest);
        assert!(a.matches("admin123"));
        assert!(b.matches("admin123"));
        assert!(!a.matches("admin1234"));
    }

    #[test]
    fn test_concurrent_equals() {
        let cred = Arc::new(Credential::from_parts("admin", "admin123", None));
        std::thread::scope(|s| {
            for _ in 0..4 {
                let cred = Arc::clone(&cred);
                s.spawn(move || {
                    let candidate = Credential::from_parts("admin", "admin123", None);
                    assert!(cred.equals(&candidate));
                });
            }
        });
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let cred = Credential::from_parts("admin", "admin123", Some(now));
        assert!(cred.is_expired(now));
        assert!(!cred.is_expired(now - chrono::TimeDelta::seconds(1)));
        assert!(!Credential::from_parts("admin", "admin123", None).is_expired(now));
    }

    #[test]
    fn test_json_round_trip() {
        let cred = server_credential();
        let json = serde_json::to_value(&cred).unwrap();
        assert_eq!(json["accessKey"], "admin");
        assert_eq!(json["secretKey"], "admin123");
        assert!(json.get("expiry").is_none());
        assert!(json.get("secretKeyHash").is_none());

        let loaded: Credential = serde_json::from_value(json).unwrap();
        assert!(loaded.equals(&Credential::from_parts("admin", "admin123", None)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let out = format!("{:?}", server_credential());
        assert!(out.contains("admin"));
        assert!(!out.contains("admin123"));
    }
}
