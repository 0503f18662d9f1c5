//! Multi-disk erasure-coded backend

use crate::disk::StorageDisk;
use reed_solomon_simd::ReedSolomonEncoder;
use tessera_common::{Error, Result};
use tessera_placement::{ErasureLayout, Topology};
use tracing::debug;

/// Smallest shard the codec is probed with; Reed-Solomon shards must be even
const PROBE_SHARD_SIZE: usize = 64;

/// Erasure-coded engine spanning every disk of a topology
#[derive(Debug)]
pub struct ErasureEngine {
    topology: Topology,
    disks: Vec<StorageDisk>,
    layout: ErasureLayout,
}

impl ErasureEngine {
    /// Validate the topology and open every disk in placement order
    ///
    /// Nothing is returned unless every local disk could be prepared.
    pub fn new(topology: Topology) -> Result<Self> {
        let layout = ErasureLayout::for_topology(&topology)?;

        // The codec must accept the split before any disk is touched
        ReedSolomonEncoder::new(layout.data_shards(), layout.parity_shards(), PROBE_SHARD_SIZE)
            .map_err(|e| {
                Error::ErasureCoding(format!(
                    "unsupported layout {}+{}: {}",
                    layout.data_shards(),
                    layout.parity_shards(),
                    e
                ))
            })?;

        let disks = topology
            .iter()
            .map(StorageDisk::open)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Opened {} disks ({} local)",
            disks.len(),
            disks.iter().filter(|d| d.is_local()).count()
        );

        Ok(Self {
            topology,
            disks,
            layout,
        })
    }

    /// Data/parity split
    pub const fn layout(&self) -> ErasureLayout {
        self.layout
    }

    /// Disks in placement order
    pub fn disks(&self) -> &[StorageDisk] {
        &self.disks
    }

    /// Topology the engine was built from
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_placement::parse_storage_endpoints;

    fn temp_disks(root: &std::path::Path, n: usize) -> Vec<String> {
        (1..=n)
            .map(|i| root.join(format!("disk{i}")).to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_new_erasure_engine() {
        let dir = tempfile::tempdir().unwrap();
        let disks = temp_disks(dir.path(), 8);
        let engine = ErasureEngine::new(parse_storage_endpoints(&disks).unwrap()).unwrap();

        assert_eq!(engine.layout().data_shards(), 4);
        assert_eq!(engine.layout().parity_shards(), 4);
        assert_eq!(engine.disks().len(), 8);
        assert_eq!(engine.topology().len(), 8);
        for (disk, raw) in engine.disks().iter().zip(&disks) {
            assert_eq!(disk.local_path().unwrap().to_string_lossy(), raw.as_str());
            assert!(disk.local_path().unwrap().is_dir());
        }
    }

    #[test]
    fn test_invalid_disk_count_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let disks = temp_disks(dir.path(), 7);
        let err = ErasureEngine::new(parse_storage_endpoints(&disks).unwrap()).unwrap_err();
        assert!(matches!(err, Error::UnevenDiskCount { count: 7 }));
        assert!(!dir.path().join("disk1").exists());
    }

    #[test]
    fn test_bad_disk_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let disks = temp_disks(dir.path(), 6);
        std::fs::write(&disks[3], b"file").unwrap();

        let err = ErasureEngine::new(parse_storage_endpoints(&disks).unwrap()).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_distributed_disks() {
        let disks: Vec<String> = (1..=6)
            .map(|i| format!("http://node{i}:9000/export"))
            .collect();
        let engine = ErasureEngine::new(parse_storage_endpoints(&disks).unwrap()).unwrap();
        assert!(engine.disks().iter().all(|d| !d.is_local()));
        assert_eq!(engine.layout().write_quorum(), 4);
    }
}
