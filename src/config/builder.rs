//! Builder pattern for remote configuration.
//!
//! Provides a fluent API for configuring and creating [`Remote`] instances.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use replpad::Remote;
//!
//! # fn example() -> replpad::Result<()> {
//! let remote = Remote::builder()
//!     .endpoint("localhost:8000/socket")
//!     .reconnect_delay(Duration::from_secs(1))
//!     .build()?;
//! # let _ = remote;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::context::Remote;
use crate::error::Result;
use crate::signals::{TracingSink, UiSink};

use super::endpoint::Endpoint;
use super::options::{DEFAULT_RECONNECT_DELAY, RemoteConfig};

// ============================================================================
// RemoteBuilder
// ============================================================================

/// Builder for configuring a [`Remote`] instance.
///
/// Use [`Remote::builder()`] to create a new builder.
#[derive(Default, Clone)]
pub struct RemoteBuilder {
    /// Endpoint string, parsed at build time.
    endpoint: Option<String>,
    /// Reconnect delay.
    reconnect_delay: Option<Duration>,
    /// Receiver of UI signals.
    sink: Option<Arc<dyn UiSink>>,
}

impl fmt::Debug for RemoteBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteBuilder")
            .field("endpoint", &self.endpoint)
            .field("reconnect_delay", &self.reconnect_delay)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

// ============================================================================
// RemoteBuilder Implementation
// ============================================================================

impl RemoteBuilder {
    /// Creates a new builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the remote endpoint as `host:port/path`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Address string, e.g. `"192.168.1.24:8000/socket"`
    #[inline]
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the delay between a disconnect and the next connect attempt.
    #[inline]
    #[must_use]
    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = Some(delay);
        self
    }

    /// Sets the receiver of connectivity, display and button signals.
    ///
    /// Defaults to [`TracingSink`], which only logs.
    #[inline]
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn UiSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the remote with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`](crate::Error::Config) if the endpoint does not parse
    /// - [`Error::Config`](crate::Error::Config) if the reconnect delay is zero
    pub fn build(self) -> Result<Remote> {
        let config = RemoteConfig {
            endpoint: self.validate_endpoint()?,
            reconnect_delay: self.reconnect_delay.unwrap_or(DEFAULT_RECONNECT_DELAY),
        };
        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink));

        Remote::init(config, sink)
    }
}

// ============================================================================
// Validation
// ============================================================================

impl RemoteBuilder {
    /// Validates the endpoint configuration.
    fn validate_endpoint(&self) -> Result<Endpoint> {
        match &self.endpoint {
            Some(raw) => raw.parse(),
            None => Ok(RemoteConfig::new().endpoint),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
