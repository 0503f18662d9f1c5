//! Tessera Common - Shared types and utilities
//!
//! This crate provides the error taxonomy and configuration structures
//! used by every stage of cluster bootstrap.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
