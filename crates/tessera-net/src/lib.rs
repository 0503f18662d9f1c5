//! Tessera Net - Listen address resolution
//!
//! This crate turns a bind specifier such as `:9000` or `10.0.0.5:9000`
//! into the concrete hosts and port the node listens on, and into the
//! endpoint URLs advertised to operators and peers.
//!
//! # Example
//!
//! ```rust,ignore
//! use tessera_net::{build_listener_endpoints, resolve_listen_address};
//!
//! let listen = resolve_listen_address(":9000")?;
//! assert_eq!(listen.port(), "9000");
//!
//! // One endpoint per local IPv4 address
//! let endpoints = build_listener_endpoints(":9000")?;
//! ```

pub mod addr;
pub mod endpoint;
pub mod interfaces;

pub use addr::{ListenSet, resolve_listen_address, resolve_listen_address_with, split_host_port};
pub use endpoint::{
    ListenerScheme, build_listener_endpoints, build_listener_endpoints_with,
    build_listener_endpoints_with_scheme,
};
pub use interfaces::{InterfaceSource, SystemInterfaces, local_ipv4_addrs};
