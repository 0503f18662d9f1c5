//! Tessera Authentication - Server identity
//!
//! This crate provides:
//! - Access/secret key generation from the OS entropy source
//! - Key length validation
//! - Salted secret-key hashing and constant-time credential comparison
//!
//! # Example
//!
//! ```rust,ignore
//! use tessera_auth::CredentialManager;
//!
//! let manager = CredentialManager::default();
//! let server = manager.generate(None)?;
//!
//! // Later, for a key pair presented by a client
//! let candidate = Credential::from_parts(access_key, secret_key, None);
//! if !manager.equals(&server, &candidate) {
//!     // deny the request
//! }
//! ```

pub mod credential;
pub mod error;
pub mod manager;

pub use credential::Credential;
pub use error::AuthError;
pub use manager::{CredentialManager, CredentialSource};
pub use tessera_common::config::{
    ACCESS_KEY_MAX_LEN, ACCESS_KEY_MIN_LEN, SECRET_KEY_MAX_LEN, SECRET_KEY_MIN_LEN,
};
