//! Tessera Server - storage node
//!
//! This binary bootstraps a storage node: listener endpoints, storage
//! topology and backend, and the server credential.

use anyhow::{Context, Result};
use clap::Parser;
use tessera_auth::CredentialSource;
use tessera_common::Config;
use tessera_server::bootstrap;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "tessera-server")]
#[command(about = "Tessera erasure-coded object storage node")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "/etc/tessera/server.toml")]
    config: String,

    /// Bind address (host:port); an empty host listens on all interfaces
    #[arg(short, long)]
    address: Option<String>,

    /// Advertise https listener endpoints
    #[arg(long)]
    secure: bool,

    /// Access key (generated if neither key is set)
    #[arg(long, env = "TESSERA_ACCESS_KEY")]
    access_key: Option<String>,

    /// Secret key (generated if neither key is set)
    #[arg(long, env = "TESSERA_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Log level
    #[arg(long)]
    log_level: Option<String>,

    /// Disks: one local path, or 6 to 16 paths or http(s)://host:port/path URLs
    disks: Vec<String>,
}

/// Apply command line overrides on top of the config file
fn apply_args(config: &mut Config, args: Args) {
    if let Some(address) = args.address {
        config.server.address = address;
    }
    if args.secure {
        config.server.secure = true;
    }
    if !args.disks.is_empty() {
        config.storage.disks = args.disks;
    }
    if let Some(access_key) = args.access_key {
        config.credential.access_key = Some(access_key);
    }
    if let Some(secret_key) = args.secret_key {
        config.credential.secret_key = Some(secret_key);
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load config file, CLI takes precedence
    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config file {}", args.config))?;
    apply_args(&mut config, args);

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tessera node");

    let node = match bootstrap(&config) {
        Ok(node) => node,
        Err(err) => {
            if let Some(cause) = err.downcast_ref::<tessera_common::Error>() {
                if cause.is_topology_error() {
                    error!("Disk set rejected: {}", cause);
                } else if cause.is_input_error() {
                    error!("Address or endpoint rejected: {}", cause);
                }
            }
            return Err(err);
        }
    };

    info!("Storage backend: {}", node.engine.kind());
    for endpoint in &node.endpoints {
        info!("Endpoint: {}", endpoint);
    }
    info!("Access key: {}", node.credential.access_key());

    if node.credential_source == CredentialSource::Generated {
        // Printed once, never logged
        println!("AccessKey: {}", node.credential.access_key());
        println!("SecretKey: {}", node.credential.secret_key());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys() -> Config {
        let mut config = Config::default();
        config.credential.access_key = Some("fileaccess".into());
        config.credential.secret_key = Some("filesecret".into());
        config
    }

    #[test]
    fn test_access_key_override_keeps_file_secret() {
        let mut config = config_with_keys();
        let args = Args::parse_from(["tessera-server", "--access-key", "cliaccess"]);
        apply_args(&mut config, args);

        assert_eq!(config.credential.access_key.as_deref(), Some("cliaccess"));
        assert_eq!(config.credential.secret_key.as_deref(), Some("filesecret"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_secret_key_override_keeps_file_access_key() {
        let mut config = config_with_keys();
        let args = Args::parse_from(["tessera-server", "--secret-key", "clisecret"]);
        apply_args(&mut config, args);

        assert_eq!(config.credential.access_key.as_deref(), Some("fileaccess"));
        assert_eq!(config.credential.secret_key.as_deref(), Some("clisecret"));
    }

    #[test]
    fn test_no_overrides() {
        let mut config = config_with_keys();
        config.storage.disks = vec!["/mnt/disk1".into()];
        let expected = config.clone();
        apply_args(&mut config, Args::parse_from(["tessera-server"]));

        assert_eq!(config, expected);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();
        let args = Args::parse_from([
            "tessera-server",
            "--address",
            "127.0.0.1:9100",
            "--secure",
            "--log-level",
            "debug",
            "/mnt/disk1",
        ]);
        apply_args(&mut config, args);

        assert_eq!(config.server.address, "127.0.0.1:9100");
        assert!(config.server.secure);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.storage.disks, vec!["/mnt/disk1".to_string()]);
    }
}
