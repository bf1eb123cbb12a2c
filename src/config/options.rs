//! Remote connection options.
//!
//! Configuration is deliberately tiny: where to connect and how long to
//! wait between reconnect attempts.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use replpad::{Endpoint, RemoteConfig};
//!
//! let config = RemoteConfig::new()
//!     .with_endpoint(Endpoint::new("localhost", 8000, "/socket"))
//!     .with_reconnect_delay(Duration::from_millis(500));
//!
//! assert_eq!(config.endpoint.to_string(), "localhost:8000/socket");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::error::{Error, Result};

use super::endpoint::Endpoint;

// ============================================================================
// Constants
// ============================================================================

/// Endpoint dialled when none is configured.
pub const DEFAULT_ENDPOINT: &str = "192.168.1.24:8000/socket";

/// Wait between a disconnect and the next connect attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(3);

// ============================================================================
// RemoteConfig
// ============================================================================

/// Connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Remote interpreter address.
    pub endpoint: Endpoint,

    /// Delay before each reconnect attempt.
    pub reconnect_delay: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl RemoteConfig {
    /// Creates a configuration with the default endpoint and delay.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: Endpoint::new("192.168.1.24", 8000, "/socket"),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl RemoteConfig {
    /// Sets the endpoint.
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Sets the reconnect delay.
    #[inline]
    #[must_use]
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl RemoteConfig {
    /// Checks that the configuration can drive a connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the reconnect delay is zero.
    pub fn validate(&self) -> Result<()> {
        if self.reconnect_delay.is_zero() {
            return Err(Error::config(
                "Reconnect delay must be greater than zero.\n\
                 Example: Remote::builder().reconnect_delay(Duration::from_secs(3))",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
