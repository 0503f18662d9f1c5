//! Credential generation and validation

use crate::credential::{Credential, is_access_key_valid, is_secret_key_valid};
use crate::error::AuthError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use tessera_common::config::{
    ACCESS_KEY_MAX_LEN, ACCESS_KEY_MIN_LEN, CredentialConfig, SECRET_KEY_MAX_LEN,
    SECRET_KEY_MIN_LEN,
};

/// Characters generated access keys are drawn from
const ALPHA_NUMERIC_TABLE: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Where the server credential came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialSource {
    /// Keys supplied by configuration or environment
    Configured,
    /// Keys generated at startup
    Generated,
}

/// Creates and checks credentials under a fixed secret key length bound
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CredentialManager {
    secret_key_max_len: usize,
}

impl Default for CredentialManager {
    fn default() -> Self {
        Self {
            secret_key_max_len: SECRET_KEY_MAX_LEN,
        }
    }
}

impl CredentialManager {
    /// Create a manager whose secret keys are at most `secret_key_max_len`
    /// long; generated secret keys have exactly that length
    pub fn new(secret_key_max_len: usize) -> Result<Self, AuthError> {
        if !(SECRET_KEY_MIN_LEN..=SECRET_KEY_MAX_LEN).contains(&secret_key_max_len) {
            return Err(AuthError::InvalidConfig(format!(
                "secret key max length must be between {SECRET_KEY_MIN_LEN} and {SECRET_KEY_MAX_LEN}, got {secret_key_max_len}"
            )));
        }
        Ok(Self { secret_key_max_len })
    }

    /// Create a manager from the credential section of the configuration
    pub fn from_config(config: &CredentialConfig) -> Result<Self, AuthError> {
        Self::new(config.secret_key_max_len)
    }

    /// Upper bound on secret key length
    pub const fn secret_key_max_len(&self) -> usize {
        self.secret_key_max_len
    }

    /// Generate a fresh credential from the OS entropy source
    pub fn generate(&self, expiry: Option<DateTime<Utc>>) -> Result<Credential, AuthError> {
        let mut key_bytes = [0u8; ACCESS_KEY_MAX_LEN];
        OsRng.try_fill_bytes(&mut key_bytes)?;
        let access_key: String = key_bytes
            .iter()
            .map(|b| ALPHA_NUMERIC_TABLE[usize::from(*b) % ALPHA_NUMERIC_TABLE.len()] as char)
            .collect();

        let mut secret_bytes = vec![0u8; self.secret_key_max_len];
        OsRng.try_fill_bytes(&mut secret_bytes)?;
        let mut secret_key = STANDARD.encode(&secret_bytes);
        secret_key.truncate(self.secret_key_max_len);

        self.create(access_key, secret_key, expiry)
    }

    /// Validate key lengths and build a hashed credential
    pub fn create(
        &self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        expiry: Option<DateTime<Utc>>,
    ) -> Result<Credential, AuthError> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();

        if !is_access_key_valid(&access_key) {
            return Err(AuthError::InvalidAccessKeyLength {
                min: ACCESS_KEY_MIN_LEN,
                max: ACCESS_KEY_MAX_LEN,
            });
        }
        if !is_secret_key_valid(&secret_key, self.secret_key_max_len) {
            return Err(AuthError::InvalidSecretKeyLength {
                min: SECRET_KEY_MIN_LEN,
                max: self.secret_key_max_len,
            });
        }

        Credential::hashed(access_key, secret_key, expiry)
    }

    /// Use the configured key pair, or generate one when none is configured
    pub fn load_or_generate(
        &self,
        config: &CredentialConfig,
    ) -> Result<(Credential, CredentialSource), AuthError> {
        match (&config.access_key, &config.secret_key) {
            (Some(access_key), Some(secret_key)) => Ok((
                self.create(access_key.as_str(), secret_key.as_str(), None)?,
                CredentialSource::Configured,
            )),
            (None, None) => Ok((self.generate(None)?, CredentialSource::Generated)),
            _ => Err(AuthError::InvalidConfig(
                "access key and secret key must be configured together".into(),
            )),
        }
    }

    /// Check key lengths under this manager's bounds
    pub fn is_valid(&self, cred: &Credential) -> bool {
        cred.is_valid_within(self.secret_key_max_len)
    }

    /// Check a presented credential against the server credential
    ///
    /// An invalid `other` is rejected without hashing.
    pub fn equals(&self, cred: &Credential, other: &Credential) -> bool {
        cred.equals_within(other, self.secret_key_max_len)
    }
}
