//! Listener endpoint URLs

use crate::addr::resolve_listen_address_with;
use crate::interfaces::{InterfaceSource, SystemInterfaces};
use tessera_common::Result;

/// URL scheme advertised for listener endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ListenerScheme {
    #[default]
    Http,
    Https,
}

impl ListenerScheme {
    /// Select the scheme from whether TLS is configured
    pub const fn from_secure(secure: bool) -> Self {
        if secure { Self::Https } else { Self::Http }
    }

    /// Get the scheme name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl std::fmt::Display for ListenerScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build `http://host:port` endpoints for a bind address
pub fn build_listener_endpoints(addr: &str) -> Result<Vec<String>> {
    build_listener_endpoints_with_scheme(addr, ListenerScheme::Http)
}

/// Build listener endpoints with an explicit scheme
pub fn build_listener_endpoints_with_scheme(
    addr: &str,
    scheme: ListenerScheme,
) -> Result<Vec<String>> {
    build_listener_endpoints_with(addr, scheme, &SystemInterfaces)
}

/// Build listener endpoints, enumerating interfaces through `source`
///
/// A wildcard host yields one endpoint per local IPv4 address, an explicit
/// host exactly one. The result is never empty.
pub fn build_listener_endpoints_with<S: InterfaceSource + ?Sized>(
    addr: &str,
    scheme: ListenerScheme,
    source: &S,
) -> Result<Vec<String>> {
    let listen = resolve_listen_address_with(addr, source)?;
    Ok(listen
        .hosts()
        .iter()
        .map(|host| {
            if host.contains(':') {
                format!("{scheme}://[{host}]:{}", listen.port())
            } else {
                format!("{scheme}://{host}:{}", listen.port())
            }
        })
        .collect())
}
