//! Tessera Storage - Storage backend selection
//!
//! This crate builds the storage engine a node serves objects from:
//! - Single-disk topologies get a filesystem-backed engine
//! - Multi-disk topologies get an erasure-coded engine with an even
//!   data/parity split
//!
//! The returned [`StorageEngine`] is tagged with the backend it holds, so
//! callers branch on [`BackendKind`] rather than inspecting types.

pub mod disk;
pub mod engine;
pub mod erasure;
pub mod fs;

// Re-exports
pub use disk::StorageDisk;
pub use engine::{BackendKind, StorageEngine, new_storage_engine};
pub use erasure::ErasureEngine;
pub use fs::FsEngine;
