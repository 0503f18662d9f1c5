//! Storage endpoint parsing

use serde::Serialize;
use tessera_common::{Error, Result};

/// How a storage endpoint is reached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointScheme {
    /// Directory on this node's filesystem
    Local,
    /// Disk served by a peer over HTTP
    Http,
    /// Disk served by a peer over HTTPS
    Https,
}

impl EndpointScheme {
    /// Get the scheme name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Whether endpoints with this scheme live on another node
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Http | Self::Https)
    }
}

impl std::fmt::Display for EndpointScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed disk specifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct StorageEndpoint {
    scheme: EndpointScheme,
    /// `host[:port]` for remote endpoints, empty for local ones
    host: String,
    path: String,
}

impl StorageEndpoint {
    /// Parse a single raw disk specifier
    ///
    /// Anything containing `://` is treated as a URL and must use `http` or
    /// `https` with a host and a non-root path. Everything else is a local
    /// filesystem path.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::invalid_endpoint(raw, "empty disk specifier"));
        }
        if raw.trim() != raw {
            return Err(Error::invalid_endpoint(
                raw,
                "leading or trailing whitespace is not allowed",
            ));
        }

        if raw.contains("://") {
            Self::parse_url(raw)
        } else {
            Ok(Self::local(raw))
        }
    }

    /// Create a local filesystem endpoint
    ///
    /// The path is normalized so different spellings of one directory
    /// compare equal.
    pub fn local(path: impl AsRef<str>) -> Self {
        Self {
            scheme: EndpointScheme::Local,
            host: String::new(),
            path: normalize_path(path.as_ref()),
        }
    }

    fn parse_url(raw: &str) -> Result<Self> {
        let uri: http::Uri = raw
            .parse()
            .map_err(|e: http::uri::InvalidUri| Error::invalid_endpoint(raw, e.to_string()))?;

        let scheme = match uri.scheme_str() {
            Some("http") => EndpointScheme::Http,
            Some("https") => EndpointScheme::Https,
            Some(other) => {
                return Err(Error::invalid_endpoint(
                    raw,
                    format!("unsupported scheme {other:?}"),
                ));
            }
            None => return Err(Error::invalid_endpoint(raw, "missing scheme")),
        };

        let authority = uri
            .authority()
            .ok_or_else(|| Error::invalid_endpoint(raw, "missing host"))?;
        if authority.as_str().contains('@') {
            return Err(Error::invalid_endpoint(raw, "user info is not allowed"));
        }
        if authority.host().is_empty() {
            return Err(Error::invalid_endpoint(raw, "missing host"));
        }
        if uri.query().is_some() {
            return Err(Error::invalid_endpoint(raw, "query string is not allowed"));
        }

        let path = normalize_path(uri.path());
        if !path.starts_with('/') || path == "/" {
            return Err(Error::invalid_endpoint(raw, "missing disk path"));
        }

        // Hostnames are case-insensitive
        Ok(Self {
            scheme,
            host: authority.as_str().to_ascii_lowercase(),
            path,
        })
    }

    /// Get the endpoint scheme
    pub const fn scheme(&self) -> EndpointScheme {
        self.scheme
    }

    /// Get `host[:port]`, empty for local endpoints
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the disk path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this endpoint is a directory on this node
    pub const fn is_local(&self) -> bool {
        !self.scheme.is_remote()
    }

    /// Whether this endpoint is served by a peer node
    pub const fn is_remote(&self) -> bool {
        self.scheme.is_remote()
    }
}

impl std::fmt::Display for StorageEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_local() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}://{}{}", self.scheme, self.host, self.path)
        }
    }
}

impl std::str::FromStr for StorageEndpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Collapse repeated `/`, drop `.` segments and trailing separators
///
/// `..` is kept as written since resolving it depends on symlinks.
fn normalize_path(path: &str) -> String {
    let path = trim_trailing_separators(path);
    let absolute = path.starts_with('/');
    let joined = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Drop trailing `/` and `\`, keeping a lone root separator
fn trim_trailing_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() && !path.is_empty() {
        &path[..1]
    } else {
        trimmed
    }
}
