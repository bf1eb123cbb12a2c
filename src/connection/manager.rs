//! Connection manager.
//!
//! The state machine that decides when to (re)connect.
//!
//! ```text
//!              start()                 Opened
//! Disconnected ───────► Connecting ───────────► Connected
//!      ▲                    │                       │
//!      │       Closed       │        Closed         │
//!      └────────────────────┴───────────────────────┘
//!      │
//!      └── schedule one reconnect after `reconnect_delay` ──► Connecting
//! ```
//!
//! Reconnection is unconditional and unbounded: the remote is expected to
//! come and go. At most one reconnect timer is pending at any time, and
//! events from sockets other than the current one are ignored.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::context::RemoteContext;
use crate::dispatch::CommandDispatcher;
use crate::error::{Error, Result};
use crate::transport::{SocketEvent, Timer, Transport, TransportEvent};

use super::state::{Connection, ConnectionState};

// ============================================================================
// ConnectionManager
// ============================================================================

/// Drives a [`Connection`] through its lifecycle.
///
/// Everything happens on the caller's thread: feed it transport events
/// with [`handle_event`](Self::handle_event) and timer expiries with
/// [`reconnect_due`](Self::reconnect_due).
pub struct ConnectionManager<T, S> {
    ctx: Arc<RemoteContext>,
    connection: Connection<T>,
    dispatcher: CommandDispatcher,
    timer: S,
    /// Set while a reconnect timer is armed and has not fired.
    reconnect_pending: bool,
    /// Set by `shutdown`; nothing reconnects afterwards.
    stopped: bool,
    /// Connect attempts issued so far.
    attempts: u64,
}

impl<T: Transport, S: Timer> ConnectionManager<T, S> {
    /// Creates a manager in the `Disconnected` state.
    #[must_use]
    pub fn new(ctx: Arc<RemoteContext>, transport: T, timer: S) -> Self {
        let connection = Connection::new(ctx.endpoint().clone(), transport);
        let dispatcher = CommandDispatcher::new(Arc::clone(&ctx));

        Self {
            ctx,
            connection,
            dispatcher,
            timer,
            reconnect_pending: false,
            stopped: false,
            attempts: 0,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the connection state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Returns `true` when connected.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Returns `true` while a reconnect timer is pending.
    #[inline]
    #[must_use]
    pub const fn reconnect_pending(&self) -> bool {
        self.reconnect_pending
    }

    /// Returns the number of connect attempts issued.
    #[inline]
    #[must_use]
    pub const fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Returns the connection.
    #[inline]
    #[must_use]
    pub fn connection(&self) -> &Connection<T> {
        &self.connection
    }

    /// Returns the timer.
    #[inline]
    #[must_use]
    pub fn timer(&self) -> &S {
        &self.timer
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Issues the first connect attempt.
    ///
    /// Does nothing unless the manager is `Disconnected` with no reconnect
    /// pending.
    pub fn start(&mut self) {
        if self.stopped {
            warn!("Start ignored after shutdown");
            return;
        }
        if self.state() != ConnectionState::Disconnected || self.reconnect_pending {
            debug!(state = %self.state(), "Start ignored, connection already managed");
            return;
        }

        self.connect();
    }

    /// Reacts to one transport event.
    pub fn handle_event(&mut self, event: TransportEvent) {
        if self.stopped || !self.connection.is_current(event.socket) {
            trace!(socket = %event.socket, kind = ?event.kind, "Ignoring stale socket event");
            return;
        }

        match event.kind {
            SocketEvent::Opened => self.on_opened(),
            SocketEvent::Message(text) => self.on_message(&text),
            SocketEvent::Closed { reason } => self.on_closed(reason),
        }
    }

    /// Fires the pending reconnect.
    ///
    /// Spurious calls (nothing pending, or already shut down) are ignored.
    pub fn reconnect_due(&mut self) {
        if self.stopped || !self.reconnect_pending {
            trace!("Ignoring reconnect timer with nothing pending");
            return;
        }

        self.reconnect_pending = false;
        self.connect();
    }

    /// Sends a command to the remote.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] unless connected
    /// - [`Error::ConnectionClosed`] if the socket vanished underneath
    pub fn execute(&mut self, command: &str) -> Result<()> {
        self.dispatcher.execute(&mut self.connection, command)
    }

    /// Closes the connection and stops reconnecting.
    pub fn shutdown(&mut self) {
        if self.stopped {
            return;
        }

        self.stopped = true;
        self.timer.cancel();
        self.reconnect_pending = false;

        let was_connected = self.connection.is_connected();
        self.connection.release();
        if was_connected {
            self.ctx.sink().connectivity_changed(false);
        }

        info!(attempts = self.attempts, "Connection manager shut down");
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    fn connect(&mut self) {
        self.attempts += 1;
        info!(
            endpoint = %self.ctx.endpoint(),
            attempt = self.attempts,
            "Trying to connect"
        );
        self.connection.replace_socket();
    }

    fn on_opened(&mut self) {
        self.connection.transition(ConnectionState::Connected);
        info!(endpoint = %self.ctx.endpoint(), "Connected");

        self.ctx.sink().connectivity_changed(true);

        if let Err(e) = self.dispatcher.handshake(&mut self.connection) {
            warn!(error = %e, "Failed to send handshake");
        }
    }

    fn on_message(&mut self, text: &str) {
        if let Err(e) = self.dispatcher.deliver(text) {
            warn!(error = %e, "Dropping inbound message");
        }
    }

    fn on_closed(&mut self, reason: Option<String>) {
        let previous = self.connection.transition(ConnectionState::Disconnected);

        if previous == ConnectionState::Connecting {
            let err = Error::connect_failed(
                self.ctx.endpoint(),
                reason.unwrap_or_else(|| "closed before opening".to_string()),
            );
            debug!(error = %err, "Connect attempt failed");
        } else {
            info!(reason = reason.as_deref().unwrap_or("none"), "Disconnected");
        }

        self.ctx.sink().connectivity_changed(false);
        self.schedule_reconnect();
    }

    fn schedule_reconnect(&mut self) {
        if self.reconnect_pending {
            debug!("Reconnect already pending");
            return;
        }

        let delay = self.ctx.reconnect_delay();
        self.reconnect_pending = true;
        self.timer.schedule(delay);
        debug!(?delay, "Reconnect scheduled");
    }
}
