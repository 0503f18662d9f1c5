//! Erasure-set disk count validation
//!
//! An erasure set splits its disks evenly between data and parity shards,
//! so a multi-disk topology must hold an even number of disks between
//! [`MIN_ERASURE_DISKS`] and [`MAX_ERASURE_DISKS`]. Single-disk topologies
//! are served by the filesystem backend and never reach this check.

use crate::topology::Topology;
use tessera_common::{Error, Result};

/// Smallest erasure set
pub const MIN_ERASURE_DISKS: usize = 6;

/// Largest erasure set
pub const MAX_ERASURE_DISKS: usize = 16;

/// Check that a topology can back an erasure set
///
/// Rules are checked in order and the first violation is returned:
/// too few disks, too many disks, then an odd disk count.
pub fn validate_disk_set(topology: &Topology) -> Result<()> {
    check_disk_count(topology.len())
}

fn check_disk_count(count: usize) -> Result<()> {
    if count < MIN_ERASURE_DISKS {
        return Err(Error::InsufficientDisks {
            count,
            min: MIN_ERASURE_DISKS,
        });
    }
    if count > MAX_ERASURE_DISKS {
        return Err(Error::TooManyDisks {
            count,
            max: MAX_ERASURE_DISKS,
        });
    }
    if count % 2 != 0 {
        return Err(Error::UnevenDiskCount { count });
    }
    Ok(())
}

/// Data/parity split of a validated erasure set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErasureLayout {
    data_shards: usize,
    parity_shards: usize,
}

impl ErasureLayout {
    /// Validate the topology and derive its shard split
    pub fn for_topology(topology: &Topology) -> Result<Self> {
        validate_disk_set(topology)?;
        let half = topology.len() / 2;
        Ok(Self {
            data_shards: half,
            parity_shards: half,
        })
    }

    /// Data shards per object
    pub const fn data_shards(&self) -> usize {
        self.data_shards
    }

    /// Parity shards per object
    pub const fn parity_shards(&self) -> usize {
        self.parity_shards
    }

    /// Disks in the set
    pub const fn total_disks(&self) -> usize {
        self.data_shards + self.parity_shards
    }

    /// Disks that must answer for a read to succeed
    pub const fn read_quorum(&self) -> usize {
        self.data_shards
    }

    /// Disks that must acknowledge a write
    pub const fn write_quorum(&self) -> usize {
        self.data_shards + 1
    }
}
