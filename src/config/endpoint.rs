//! Remote endpoint address.
//!
//! An endpoint is the `host:port/path` triple the connection manager dials.
//! Parsing goes through [`url::Url`] with an implied `ws://` scheme, so the
//! usual host forms (names, IPv4, bracketed IPv6) all work.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Scheme used to reach the remote interpreter.
const WS_SCHEME: &str = "ws";

/// Port used when the endpoint string carries none.
const DEFAULT_WS_PORT: u16 = 80;

// ============================================================================
// Endpoint
// ============================================================================

/// Address of the remote command interpreter.
///
/// # Example
///
/// ```
/// use replpad::Endpoint;
///
/// let endpoint: Endpoint = "192.168.1.24:8000/socket".parse().unwrap();
/// assert_eq!(endpoint.host(), "192.168.1.24");
/// assert_eq!(endpoint.port(), 8000);
/// assert_eq!(endpoint.path(), "/socket");
/// assert_eq!(endpoint.ws_url(), "ws://192.168.1.24:8000/socket");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Host name or address.
    host: String,
    /// TCP port.
    port: u16,
    /// Request path, always starting with `/`.
    path: String,
}

impl Endpoint {
    /// Creates an endpoint from its parts.
    ///
    /// A path without a leading `/` gets one.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }

        Self {
            host: host.into(),
            port,
            path,
        }
    }

    /// Returns the host.
    #[inline]
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the request path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the WebSocket URL for this endpoint.
    ///
    /// Format: `ws://{host}:{port}{path}`
    #[inline]
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!("{WS_SCHEME}://{self}")
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.host, self.port, self.path)
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::config("Endpoint is empty"));
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("{WS_SCHEME}://{trimmed}")
        };

        let url = Url::parse(&candidate)
            .map_err(|e| Error::config(format!("Invalid endpoint {trimmed:?}: {e}")))?;

        if url.scheme() != WS_SCHEME {
            return Err(Error::config(format!(
                "Unsupported endpoint scheme {:?}, expected {WS_SCHEME}://",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::config(format!("Endpoint {trimmed:?} has no host")))?;

        let port = url.port_or_known_default().unwrap_or(DEFAULT_WS_PORT);

        let mut path = url.path().to_string();
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(Self::new(host, port, path))
    }
}

// ============================================================================
// Tests
// ============================================================================
