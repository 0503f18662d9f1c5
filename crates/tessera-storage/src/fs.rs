//! Single-disk filesystem backend

use crate::disk::prepare_dir;
use std::path::{Path, PathBuf};
use tessera_common::{Error, Result};
use tessera_placement::StorageEndpoint;

/// Filesystem-backed engine rooted at one local directory
#[derive(Clone, Debug)]
pub struct FsEngine {
    root: PathBuf,
}

impl FsEngine {
    /// Bind the engine to a local endpoint, creating its directory if needed
    pub fn new(endpoint: &StorageEndpoint) -> Result<Self> {
        if endpoint.is_remote() {
            return Err(Error::invalid_endpoint(
                endpoint.to_string(),
                "a single-disk setup needs a local path",
            ));
        }
        let root = prepare_dir(endpoint.path())?;
        Ok(Self { root })
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}
