//! Tessera Server - node bootstrap
//!
//! Runs the startup sequence shared by the binary and the integration
//! tests: resolve listener endpoints, build the storage topology and
//! engine, then establish the server credential.

use anyhow::{Context, Result};
use tessera_auth::{Credential, CredentialManager, CredentialSource};
use tessera_common::Config;
use tessera_net::{ListenerScheme, build_listener_endpoints_with_scheme};
use tessera_placement::parse_storage_endpoints;
use tessera_storage::{StorageEngine, new_storage_engine};
use tracing::info;

/// A node that finished bootstrapping
#[derive(Debug)]
pub struct Node {
    /// Endpoints the API listener is reachable at
    pub endpoints: Vec<String>,
    /// Storage engine serving objects
    pub engine: StorageEngine,
    /// Credential clients authenticate against
    pub credential: Credential,
    /// Whether the credential was configured or generated
    pub credential_source: CredentialSource,
    /// Manager holding the configured key bounds
    pub credential_manager: CredentialManager,
}

/// Run the startup sequence; any error means the node must not start
///
/// Nothing is written to disk until every other input has been validated.
pub fn bootstrap(config: &Config) -> Result<Node> {
    config.validate().context("Invalid configuration")?;

    let scheme = ListenerScheme::from_secure(config.server.secure);
    let endpoints = build_listener_endpoints_with_scheme(&config.server.address, scheme)
        .with_context(|| format!("Invalid listen address {:?}", config.server.address))?;

    if config.storage.disks.is_empty() {
        anyhow::bail!("No storage disks configured");
    }
    let topology =
        parse_storage_endpoints(&config.storage.disks).context("Invalid storage endpoints")?;
    info!(
        "Storage topology: {} endpoint(s), distributed={}",
        topology.len(),
        topology.is_distributed()
    );

    // Credential first: engine construction creates disk directories
    let credential_manager = CredentialManager::from_config(&config.credential)
        .context("Invalid credential configuration")?;
    let (credential, credential_source) = credential_manager
        .load_or_generate(&config.credential)
        .context("Unable to establish server credential")?;

    let engine = new_storage_engine(topology).context("Unable to initialize storage backend")?;

    Ok(Node {
        endpoints,
        engine,
        credential,
        credential_source,
        credential_manager,
    })
}
