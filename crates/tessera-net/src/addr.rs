//! Bind address parsing and resolution

use crate::interfaces::{InterfaceSource, SystemInterfaces, local_ipv4_addrs};
use std::net::{Ipv4Addr, Ipv6Addr};
use tessera_common::{Error, Result};

/// Longest hostname accepted in a bind address
const MAX_HOSTNAME_LEN: usize = 253;

/// Longest single label of a hostname
const MAX_LABEL_LEN: usize = 63;

/// Resolved form of a bind address: the hosts to listen on and the port
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListenSet {
    hosts: Vec<String>,
    port: String,
    port_number: u16,
    wildcard: bool,
}

impl ListenSet {
    /// Hosts to listen on, never empty
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Port exactly as supplied in the bind address
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Numeric port
    pub const fn port_number(&self) -> u16 {
        self.port_number
    }

    /// Whether the bind address had no host and expanded to local interfaces
    pub const fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

/// Split a `host:port` address and validate the port
///
/// IPv6 hosts must be bracketed (`[::1]:9000`); the returned host has the
/// brackets removed. The host may be empty; otherwise it must be an IP
/// literal or a DNS hostname.
pub fn split_host_port(addr: &str) -> Result<(String, String)> {
    if addr.is_empty() {
        return Err(Error::EmptyPort {
            addr: addr.to_string(),
        });
    }

    let (host, port, bracketed) = if let Some(rest) = addr.strip_prefix('[') {
        let end = rest
            .find(']')
            .ok_or_else(|| Error::malformed_address(addr, "missing ']' in address"))?;
        let host = &rest[..end];
        match &rest[end + 1..] {
            "" => {
                return Err(Error::MissingPort {
                    addr: addr.to_string(),
                });
            }
            after => match after.strip_prefix(':') {
                Some(port) => (host, port, true),
                None => {
                    return Err(Error::malformed_address(
                        addr,
                        "unexpected characters after ']'",
                    ));
                }
            },
        }
    } else {
        let idx = addr.rfind(':').ok_or_else(|| Error::MissingPort {
            addr: addr.to_string(),
        })?;
        let host = &addr[..idx];
        if host.contains(':') {
            return Err(Error::malformed_address(addr, "too many colons in address"));
        }
        (host, &addr[idx + 1..], false)
    };

    if host.contains('[') || host.contains(']') {
        return Err(Error::malformed_address(addr, "unexpected bracket in host"));
    }

    parse_port(addr, port)?;

    if bracketed {
        if host.parse::<Ipv6Addr>().is_err() {
            return Err(Error::malformed_address(addr, "invalid IPv6 address in brackets"));
        }
    } else if !host.is_empty() && host.parse::<Ipv4Addr>().is_err() && !is_valid_hostname(host)
    {
        return Err(Error::malformed_address(
            addr,
            "host must be an IP address or a DNS hostname",
        ));
    }

    Ok((host.to_string(), port.to_string()))
}

/// Whether `host` is a DNS hostname: dot-separated labels of ASCII letters,
/// digits and inner hyphens
fn is_valid_hostname(host: &str) -> bool {
    host.len() <= MAX_HOSTNAME_LEN
        && host.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= MAX_LABEL_LEN
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}

/// Validate a port segment: ASCII decimal digits, 1 through 65535
fn parse_port(addr: &str, port: &str) -> Result<u16> {
    if port.is_empty() {
        return Err(Error::EmptyPort {
            addr: addr.to_string(),
        });
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidPort {
            port: port.to_string(),
        });
    }
    match port.parse::<u16>() {
        Ok(0) => Err(Error::EmptyPort {
            addr: addr.to_string(),
        }),
        Ok(n) => Ok(n),
        Err(_) => Err(Error::InvalidPort {
            port: port.to_string(),
        }),
    }
}

/// Resolve a bind address against the host's network interfaces
pub fn resolve_listen_address(addr: &str) -> Result<ListenSet> {
    resolve_listen_address_with(addr, &SystemInterfaces)
}

/// Resolve a bind address, enumerating interfaces through `source`
///
/// An empty host expands to every local IPv4 address; an explicit host is
/// returned as the single entry without any lookup.
pub fn resolve_listen_address_with<S: InterfaceSource + ?Sized>(
    addr: &str,
    source: &S,
) -> Result<ListenSet> {
    let (host, port) = split_host_port(addr)?;
    let port_number = parse_port(addr, &port)?;

    let wildcard = host.is_empty();
    let hosts = if wildcard {
        local_ipv4_addrs(source)
            .into_iter()
            .map(|ip| ip.to_string())
            .collect()
    } else {
        vec![host]
    };

    Ok(ListenSet {
        hosts,
        port,
        port_number,
        wildcard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_split_host_port() {
        assert_eq!(
            split_host_port("127.0.0.1:9000").unwrap(),
            ("127.0.0.1".to_string(), "9000".to_string())
        );
        assert_eq!(
            split_host_port(":9000").unwrap(),
            (String::new(), "9000".to_string())
        );
        assert_eq!(
            split_host_port("[::1]:443").unwrap(),
            ("::1".to_string(), "443".to_string())
        );
        assert_eq!(
            split_host_port("node1.example.com:65535").unwrap(),
            ("node1.example.com".to_string(), "65535".to_string())
        );
    }

    #[test]
    fn test_empty_port() {
        for addr in ["", ":", ":0", "localhost:", "[::1]:", "127.0.0.1:00"] {
            let err = split_host_port(addr).unwrap_err();
            assert!(matches!(err, Error::EmptyPort { .. }), "{addr}: {err}");
        }
    }

    #[test]
    fn test_missing_port() {
        for addr in ["hostname", "10.0.0.1", "[::1]"] {
            let err = split_host_port(addr).unwrap_err();
            assert!(matches!(err, Error::MissingPort { .. }), "{addr}: {err}");
        }
        assert_eq!(
            split_host_port("hostname").unwrap_err().to_string(),
            "address hostname: missing port in address"
        );
    }

    #[test]
    fn test_invalid_port() {
        for addr in ["linux:linux", ":+80", ":-1", ":70000", ":9000a", ": 80"] {
            let err = split_host_port(addr).unwrap_err();
            assert!(matches!(err, Error::InvalidPort { .. }), "{addr}: {err}");
        }
    }

    #[test]
    fn test_malformed_address() {
        for addr in ["a:b:c", "::1:9000", "[::1:9000", "[::1]x9000", "[::1]]:9000"] {
            let err = split_host_port(addr).unwrap_err();
            assert!(matches!(err, Error::MalformedAddress { .. }), "{addr}: {err}");
        }
    }

    #[test]
    fn test_malformed_host() {
        for addr in [
            "bad host:9000",
            "a/b:9000",
            "user@h:9000",
            "node1..example.com:9000",
            "-node1:9000",
            "node1-:9000",
            "node_1:9000",
            "node1.:9000",
            "[node1]:9000",
            "[]:9000",
        ] {
            let err = split_host_port(addr).unwrap_err();
            assert!(matches!(err, Error::MalformedAddress { .. }), "{addr}: {err}");
        }

        let long_label = format!("{}:9000", "a".repeat(64));
        assert!(split_host_port(&long_label).is_err());
    }

    #[test]
    fn test_valid_hosts() {
        for addr in [
            "localhost:9000",
            "node-1.example.com:9000",
            "10.0.0.5:9000",
            "[fe80::1]:9000",
            "[::]:9000",
            "123:9000",
        ] {
            assert!(split_host_port(addr).is_ok(), "{addr}");
        }
    }

    #[test]
    fn test_resolve_explicit_host() {
        let listen = resolve_listen_address("127.0.0.1:9000").unwrap();
        assert_eq!(listen.hosts(), ["127.0.0.1".to_string()]);
        assert_eq!(listen.port(), "9000");
        assert_eq!(listen.port_number(), 9000);
        assert!(!listen.is_wildcard());
    }

    #[test]
    fn test_resolve_wildcard_host() {
        let listen = resolve_listen_address(":9000").unwrap();
        assert!(!listen.hosts().is_empty());
        assert_eq!(listen.port(), "9000");
        assert!(listen.is_wildcard());
    }

    #[test]
    fn test_resolve_wildcard_with_source() {
        let source = vec![
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)),
        ];
        let listen = resolve_listen_address_with(":9000", &source).unwrap();
        assert_eq!(
            listen.hosts(),
            ["127.0.0.1".to_string(), "192.168.1.20".to_string()]
        );
    }

    #[test]
    fn test_resolve_rejects_empty_port() {
        assert!(matches!(
            resolve_listen_address(":0").unwrap_err(),
            Error::EmptyPort { .. }
        ));
        assert!(matches!(
            resolve_listen_address("").unwrap_err(),
            Error::EmptyPort { .. }
        ));
    }
}
