//! Process-wide remote context.
//!
//! [`RemoteContext`] holds what every component shares: the configuration
//! and the UI sink. It is created once by [`Remote::init`] (or the builder)
//! and injected into the connection manager, the command dispatcher and the
//! button registry.
//!
//! # Lifecycle
//!
//! 1. `Remote::builder()...build()` - init the context
//! 2. `Remote::spawn` - start the connection actor, get a [`RemoteHandle`];
//!    a second call on the same remote (or any clone of it) fails
//! 3. `Remote::button_registry` - create the registry the UI edits
//! 4. `RemoteHandle::shutdown` - tear the connection down

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::debug;

use crate::buttons::ButtonRegistry;
use crate::client::{self, RemoteHandle};
use crate::config::{Endpoint, RemoteBuilder, RemoteConfig};
use crate::error::{Error, Result};
use crate::signals::UiSink;

// ============================================================================
// RemoteContext
// ============================================================================

/// Shared configuration and signal sink.
pub struct RemoteContext {
    /// Connection configuration.
    config: RemoteConfig,
    /// Receiver of UI signals.
    sink: Arc<dyn UiSink>,
    /// Set once the connection actor has been started.
    spawned: AtomicBool,
}

impl RemoteContext {
    /// Creates a context.
    #[must_use]
    pub fn new(config: RemoteConfig, sink: Arc<dyn UiSink>) -> Arc<Self> {
        Arc::new(Self {
            config,
            sink,
            spawned: AtomicBool::new(false),
        })
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Returns the configured endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.config.endpoint
    }

    /// Returns the configured reconnect delay.
    #[inline]
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        self.config.reconnect_delay
    }

    /// Returns the UI sink.
    #[inline]
    #[must_use]
    pub fn sink(&self) -> &dyn UiSink {
        self.sink.as_ref()
    }
}

impl fmt::Debug for RemoteContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Remote
// ============================================================================

/// Entry point: owns the context and starts the connection actor.
///
/// # Example
///
/// ```no_run
/// use replpad::{Preset, Remote};
///
/// # async fn example() -> replpad::Result<()> {
/// let remote = Remote::builder().endpoint("192.168.1.24:8000/socket").build()?;
/// let handle = remote.spawn()?;
///
/// let mut buttons = remote.button_registry();
/// buttons.add_preset(Preset::Navigation);
///
/// handle.wait_connected().await?;
/// handle.press(&buttons, 0).await?;
/// handle.shutdown().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Remote {
    /// Shared context.
    inner: Arc<RemoteContext>,
}

impl Remote {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> RemoteBuilder {
        RemoteBuilder::new()
    }

    /// Initialises the context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the reconnect delay is zero.
    pub fn init(config: RemoteConfig, sink: Arc<dyn UiSink>) -> Result<Self> {
        config.validate()?;

        debug!(endpoint = %config.endpoint, delay = ?config.reconnect_delay, "Remote initialised");
        Ok(Self {
            inner: RemoteContext::new(config, sink),
        })
    }

    /// Returns the shared context.
    #[inline]
    #[must_use]
    pub fn context(&self) -> &Arc<RemoteContext> {
        &self.inner
    }

    /// Creates an empty button registry bound to this context.
    #[must_use]
    pub fn button_registry(&self) -> ButtonRegistry {
        ButtonRegistry::new(Arc::clone(&self.inner))
    }

    /// Starts the connection actor and returns its handle.
    ///
    /// The first connect attempt is issued immediately. Must be called from
    /// within a tokio runtime. Clone the returned handle to share it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadySpawned`] if this remote, or a clone of it,
    /// has already started its actor.
    pub fn spawn(&self) -> Result<RemoteHandle> {
        if self.inner.spawned.swap(true, Ordering::AcqRel) {
            return Err(Error::AlreadySpawned);
        }

        Ok(client::spawn(Arc::clone(&self.inner)))
    }
}

// ============================================================================
// Tests
// ============================================================================
