//! Tessera Placement - Storage topology and erasure-set validation
//!
//! This crate turns the raw disk arguments a node is started with into an
//! ordered, immutable [`Topology`], and checks that a multi-disk topology
//! can back an erasure set.
//!
//! # Endpoint forms
//!
//! - **Local path**: `/mnt/disk1`, `C:\data\disk1`
//! - **Remote URL**: `http://node2:9000/mnt/disk1` (distributed mode)
//!
//! A topology is either all local paths or all URLs. Endpoint order is
//! significant: shard placement is derived from an endpoint's position.
//!
//! # Example
//! ```ignore
//! use tessera_placement::{ErasureLayout, parse_storage_endpoints};
//!
//! let disks: Vec<String> = (1..=8).map(|i| format!("/mnt/disk{i}")).collect();
//! let topology = parse_storage_endpoints(&disks)?;
//! let layout = ErasureLayout::for_topology(&topology)?;
//! assert_eq!(layout.data_shards(), 4);
//! ```

pub mod endpoint;
pub mod quorum;
pub mod topology;

pub use endpoint::{EndpointScheme, StorageEndpoint};
pub use quorum::{ErasureLayout, MAX_ERASURE_DISKS, MIN_ERASURE_DISKS, validate_disk_set};
pub use topology::{Topology, parse_storage_endpoints};
