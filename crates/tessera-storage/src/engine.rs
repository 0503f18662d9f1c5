//! Storage engine selection
//!
//! Selection runs once at startup and has no retry or degraded mode: a
//! topology that cannot back an engine is a fatal configuration error.

use crate::erasure::ErasureEngine;
use crate::fs::FsEngine;
use tessera_common::Result;
use tessera_placement::Topology;
use tracing::info;

/// Which backend a storage engine runs on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Single local directory
    Fs,
    /// Erasure-coded disk set
    Erasure,
}

impl BackendKind {
    /// Get the backend name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fs => "fs",
            Self::Erasure => "erasure",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage engine built from a topology
#[derive(Debug)]
pub enum StorageEngine {
    Fs(FsEngine),
    Erasure(ErasureEngine),
}

impl StorageEngine {
    /// Backend this engine runs on
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::Fs(_) => BackendKind::Fs,
            Self::Erasure(_) => BackendKind::Erasure,
        }
    }

    /// Filesystem engine, if selected
    pub const fn as_fs(&self) -> Option<&FsEngine> {
        match self {
            Self::Fs(engine) => Some(engine),
            Self::Erasure(_) => None,
        }
    }

    /// Erasure-coded engine, if selected
    pub const fn as_erasure(&self) -> Option<&ErasureEngine> {
        match self {
            Self::Erasure(engine) => Some(engine),
            Self::Fs(_) => None,
        }
    }
}

/// Build the storage engine for a topology
///
/// One endpoint selects the filesystem backend without any disk-count
/// checks. More than one endpoint must form a valid erasure set.
pub fn new_storage_engine(topology: Topology) -> Result<StorageEngine> {
    if topology.len() == 1 {
        let engine = FsEngine::new(&topology.endpoints()[0])?;
        info!("Storage backend: fs at {}", engine.root().display());
        return Ok(StorageEngine::Fs(engine));
    }

    let engine = ErasureEngine::new(topology)?;
    let layout = engine.layout();
    info!(
        "Storage backend: erasure with {} disks (data={}, parity={})",
        layout.total_disks(),
        layout.data_shards(),
        layout.parity_shards()
    );
    Ok(StorageEngine::Erasure(engine))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_common::Error;
    use tessera_placement::parse_storage_endpoints;

    fn temp_disks(root: &std::path::Path, n: usize) -> Vec<String> {
        (1..=n)
            .map(|i| root.join(format!("disk{i}")).to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_single_disk_selects_fs() {
        let dir = tempfile::tempdir().unwrap();
        let disks = temp_disks(dir.path(), 1);
        let engine = new_storage_engine(parse_storage_endpoints(&disks).unwrap()).unwrap();

        assert_eq!(engine.kind(), BackendKind::Fs);
        assert!(engine.as_erasure().is_none());
        assert_eq!(
            engine.as_fs().unwrap().root().to_string_lossy(),
            disks[0].as_str()
        );
    }

    #[test]
    fn test_sixteen_disks_select_erasure() {
        let dir = tempfile::tempdir().unwrap();
        let disks = temp_disks(dir.path(), 16);
        let engine = new_storage_engine(parse_storage_endpoints(&disks).unwrap()).unwrap();

        assert_eq!(engine.kind(), BackendKind::Erasure);
        let erasure = engine.as_erasure().unwrap();
        assert_eq!(erasure.layout().data_shards(), 8);
        assert_eq!(erasure.layout().parity_shards(), 8);
    }

    #[test]
    fn test_invalid_disk_sets_fail() {
        let dir = tempfile::tempdir().unwrap();

        let err = new_storage_engine(parse_storage_endpoints(&temp_disks(dir.path(), 2)).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientDisks { count: 2, .. }));

        let err = new_storage_engine(parse_storage_endpoints(&temp_disks(dir.path(), 17)).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::TooManyDisks { count: 17, .. }));

        let err = new_storage_engine(parse_storage_endpoints(&temp_disks(dir.path(), 9)).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::UnevenDiskCount { count: 9 }));
    }

    #[test]
    fn test_single_remote_disk_fails() {
        let topology = parse_storage_endpoints(&["http://node1:9000/export"]).unwrap();
        assert!(matches!(
            new_storage_engine(topology).unwrap_err(),
            Error::InvalidEndpoint { .. }
        ));
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageEngine>();
    }

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Fs.to_string(), "fs");
        assert_eq!(BackendKind::Erasure.to_string(), "erasure");
    }
}
