//! Local interface enumeration
//!
//! A wildcard bind address listens on every IPv4 address the host owns,
//! loopback included. IPv6 addresses are not advertised.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use tracing::{debug, warn};

/// Source of the host's interface addresses
pub trait InterfaceSource {
    /// All addresses bound to local interfaces, in enumeration order
    fn addrs(&self) -> io::Result<Vec<IpAddr>>;
}

/// Interface addresses as reported by the operating system
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn addrs(&self) -> io::Result<Vec<IpAddr>> {
        Ok(get_if_addrs::get_if_addrs()?
            .into_iter()
            .map(|iface| iface.ip())
            .collect())
    }
}

impl InterfaceSource for [IpAddr] {
    fn addrs(&self) -> io::Result<Vec<IpAddr>> {
        Ok(self.to_vec())
    }
}

impl InterfaceSource for Vec<IpAddr> {
    fn addrs(&self) -> io::Result<Vec<IpAddr>> {
        Ok(self.clone())
    }
}

/// Collect the de-duplicated IPv4 addresses of all local interfaces
///
/// Falls back to `127.0.0.1` when the source yields no IPv4 address or
/// cannot be read, so the result is never empty.
pub fn local_ipv4_addrs<S: InterfaceSource + ?Sized>(source: &S) -> Vec<Ipv4Addr> {
    let addrs = match source.addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            warn!("Failed to enumerate local interfaces, using loopback: {}", e);
            Vec::new()
        }
    };

    let mut ipv4s: Vec<Ipv4Addr> = Vec::with_capacity(addrs.len());
    for addr in addrs {
        if let IpAddr::V4(ip) = addr
            && !ipv4s.contains(&ip)
        {
            ipv4s.push(ip);
        }
    }

    if ipv4s.is_empty() {
        debug!("No IPv4 interface addresses found, using loopback");
        ipv4s.push(Ipv4Addr::LOCALHOST);
    }
    ipv4s
}
