//! Configuration types for Tessera
//!
//! Every field has a default so a partial (or absent) TOML file still
//! yields a usable configuration. Command-line flags are merged on top by
//! the server binary.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shortest accepted access key
pub const ACCESS_KEY_MIN_LEN: usize = 5;
/// Longest accepted access key, and the length of generated ones
pub const ACCESS_KEY_MAX_LEN: usize = 20;
/// Shortest accepted secret key
pub const SECRET_KEY_MIN_LEN: usize = 8;
/// Longest secret key common S3 clients accept
pub const SECRET_KEY_MAX_LEN: usize = 40;

/// Root configuration for a Tessera node
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Server identity
    #[serde(default)]
    pub credential: CredentialConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::configuration(e.to_string()))
    }

    /// Load a configuration file, falling back to defaults when it is absent
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.credential.validate()
    }
}

/// Listener configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address as `host:port`; an empty host listens on every interface
    #[serde(default = "default_address")]
    pub address: String,
    /// Advertise `https` listener endpoints
    #[serde(default)]
    pub secure: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            secure: false,
        }
    }
}

/// Storage configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Raw disk specifiers: local paths or `http(s)://host:port/path` URLs
    #[serde(default)]
    pub disks: Vec<String>,
}

/// Server identity configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Configured access key; generated when absent
    #[serde(default)]
    pub access_key: Option<String>,
    /// Configured secret key; generated when absent
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Upper bound for secret key length, also the length of generated keys
    #[serde(default = "default_secret_key_max_len")]
    pub secret_key_max_len: usize,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            secret_key: None,
            secret_key_max_len: default_secret_key_max_len(),
        }
    }
}

impl CredentialConfig {
    /// Validate key length bounds and that keys are configured in pairs
    pub fn validate(&self) -> Result<()> {
        if !(SECRET_KEY_MIN_LEN..=SECRET_KEY_MAX_LEN).contains(&self.secret_key_max_len) {
            return Err(Error::configuration(format!(
                "secret_key_max_len must be between {SECRET_KEY_MIN_LEN} and {SECRET_KEY_MAX_LEN}, got {}",
                self.secret_key_max_len
            )));
        }
        if self.access_key.is_some() != self.secret_key.is_some() {
            return Err(Error::configuration(
                "access_key and secret_key must be configured together",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("secret_key_max_len", &self.secret_key_max_len)
            .finish()
    }
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_address() -> String {
    ":9000".to_string()
}

const fn default_secret_key_max_len() -> usize {
    SECRET_KEY_MAX_LEN
}

fn default_log_level() -> String {
    "info".to_string()
}
