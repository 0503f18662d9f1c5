//! Ordered storage topology

use crate::endpoint::{EndpointScheme, StorageEndpoint};
use serde::Serialize;
use std::collections::HashSet;
use tessera_common::{Error, Result};

/// Validated, ordered set of storage endpoints backing one storage engine
///
/// A topology holds at least one endpoint, never mixes local paths with
/// URLs, never mixes `http` with `https`, and contains no duplicates. It
/// cannot be modified once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Topology {
    endpoints: Vec<StorageEndpoint>,
}

impl Topology {
    /// Build a topology from already-parsed endpoints
    pub fn new(endpoints: Vec<StorageEndpoint>) -> Result<Self> {
        let first = endpoints
            .first()
            .ok_or_else(|| Error::invalid_endpoint("", "no storage endpoints given"))?;
        let scheme = first.scheme();

        let mut seen = HashSet::with_capacity(endpoints.len());
        for endpoint in &endpoints {
            if endpoint.is_local() != first.is_local() {
                return Err(Error::invalid_endpoint(
                    endpoint.to_string(),
                    "local paths and URLs cannot be mixed",
                ));
            }
            if endpoint.scheme() != scheme {
                return Err(Error::invalid_endpoint(
                    endpoint.to_string(),
                    format!("scheme {} does not match {}", endpoint.scheme(), scheme),
                ));
            }
            if !seen.insert(endpoint) {
                return Err(Error::invalid_endpoint(
                    endpoint.to_string(),
                    "duplicate endpoint",
                ));
            }
        }

        Ok(Self { endpoints })
    }

    /// Number of endpoints
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Endpoints in placement order
    pub fn endpoints(&self) -> &[StorageEndpoint] {
        &self.endpoints
    }

    /// Iterate endpoints in placement order
    pub fn iter(&self) -> std::slice::Iter<'_, StorageEndpoint> {
        self.endpoints.iter()
    }

    /// Scheme shared by every endpoint
    pub fn scheme(&self) -> EndpointScheme {
        self.endpoints[0].scheme()
    }

    /// Whether the disks are spread across nodes
    pub fn is_distributed(&self) -> bool {
        self.scheme().is_remote()
    }
}

impl<'a> IntoIterator for &'a Topology {
    type Item = &'a StorageEndpoint;
    type IntoIter = std::slice::Iter<'a, StorageEndpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse raw disk specifiers into a topology, preserving their order
pub fn parse_storage_endpoints<S: AsRef<str>>(raw_disks: &[S]) -> Result<Topology> {
    let endpoints = raw_disks
        .iter()
        .map(|raw| StorageEndpoint::parse(raw.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Topology::new(endpoints)
}
