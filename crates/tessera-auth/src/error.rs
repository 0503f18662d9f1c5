//! Credential error types

use thiserror::Error;

/// Credential errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid access key, access key should be {min} to {max} characters in length")]
    InvalidAccessKeyLength { min: usize, max: usize },

    #[error("invalid secret key, secret key should be {min} to {max} characters in length")]
    InvalidSecretKeyLength { min: usize, max: usize },

    #[error("entropy source failed: {0}")]
    Entropy(String),

    #[error("unable to hash secret key: {0}")]
    Hash(String),

    #[error("invalid credential configuration: {0}")]
    InvalidConfig(String),
}

impl From<rand::Error> for AuthError {
    fn from(e: rand::Error) -> Self {
        Self::Entropy(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(e: bcrypt::BcryptError) -> Self {
        Self::Hash(e.to_string())
    }
}
