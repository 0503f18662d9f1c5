//! Storage disks
//!
//! Local disks are directories this node owns and prepares at startup.
//! Remote disks belong to peers; they are only recorded here and reached
//! through the inter-node transport once the engine is running.

use std::path::{Path, PathBuf};
use tessera_common::{Error, Result};
use tessera_placement::StorageEndpoint;
use tracing::debug;

/// One disk of a storage engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageDisk {
    /// Directory on this node
    Local { path: PathBuf },
    /// Disk served by a peer node
    Remote { endpoint: StorageEndpoint },
}

impl StorageDisk {
    /// Open the disk behind an endpoint, preparing it when it is local
    pub fn open(endpoint: &StorageEndpoint) -> Result<Self> {
        if endpoint.is_remote() {
            debug!("Registered remote disk {}", endpoint);
            return Ok(Self::Remote {
                endpoint: endpoint.clone(),
            });
        }
        let path = prepare_dir(endpoint.path())?;
        Ok(Self::Local { path })
    }

    /// Whether the disk is on this node
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }

    /// Local directory, if the disk is on this node
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Self::Local { path } => Some(path),
            Self::Remote { .. } => None,
        }
    }
}

impl std::fmt::Display for StorageDisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local { path } => write!(f, "{}", path.display()),
            Self::Remote { endpoint } => write!(f, "{endpoint}"),
        }
    }
}

/// Create a disk directory if needed and check that it is a directory
pub(crate) fn prepare_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.exists() {
        if !path.is_dir() {
            return Err(Error::storage(format!(
                "disk path {} is not a directory",
                path.display()
            )));
        }
    } else {
        std::fs::create_dir_all(path)?;
        debug!("Created disk directory {}", path.display());
    }
    Ok(path.to_path_buf())
}
