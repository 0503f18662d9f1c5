//! Error types for Tessera
//!
//! This module defines the errors raised while bootstrapping a node:
//! bind-address resolution, storage endpoint parsing, disk-set validation
//! and backend construction.

use thiserror::Error;

/// Common result type for Tessera operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for Tessera
#[derive(Debug, Error)]
pub enum Error {
    // Address errors
    #[error("empty port in address {addr:?}")]
    EmptyPort { addr: String },

    #[error("address {addr}: missing port in address")]
    MissingPort { addr: String },

    #[error("invalid port {port:?}: expected a decimal number between 1 and 65535")]
    InvalidPort { port: String },

    #[error("malformed address {addr:?}: {reason}")]
    MalformedAddress { addr: String, reason: String },

    // Endpoint errors
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    // Topology errors
    #[error("insufficient disks: have {count}, need at least {min}")]
    InsufficientDisks { count: usize, min: usize },

    #[error("too many disks: have {count}, at most {max} are supported")]
    TooManyDisks { count: usize, max: usize },

    #[error("uneven disk count {count}: erasure coding needs an even number of disks")]
    UnevenDiskCount { count: usize },

    // Storage errors
    #[error("disk I/O error: {0}")]
    DiskIo(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("erasure coding error: {0}")]
    ErasureCoding(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create an invalid endpoint error
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed address error
    pub fn malformed_address(addr: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAddress {
            addr: addr.into(),
            reason: reason.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this error comes from operator-supplied addresses or endpoints
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyPort { .. }
                | Self::MissingPort { .. }
                | Self::InvalidPort { .. }
                | Self::MalformedAddress { .. }
                | Self::InvalidEndpoint { .. }
        )
    }

    /// Check if this error describes an unusable disk set
    #[must_use]
    pub const fn is_topology_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientDisks { .. } | Self::TooManyDisks { .. } | Self::UnevenDiskCount { .. }
        )
    }
}
