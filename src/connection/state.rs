//! Connection state and the owned socket slot.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tracing::debug;

use crate::config::Endpoint;
use crate::error::{Error, Result};
use crate::identifiers::SocketId;
use crate::transport::Transport;

// ============================================================================
// ConnectionState
// ============================================================================

/// Connectivity as seen by the connection manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// No socket, or the last one closed.
    #[default]
    Disconnected,
    /// A connect attempt is in flight.
    Connecting,
    /// The socket is open and the handshake was sent.
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        })
    }
}

// ============================================================================
// Connection
// ============================================================================

/// The single connection: state, endpoint and the current socket handle.
///
/// The socket is replaced on every attempt, never reused. The previous
/// handle is detached before the next one is created, so at most one
/// socket is attached at any time.
#[derive(Debug)]
pub struct Connection<T> {
    state: ConnectionState,
    endpoint: Endpoint,
    socket: Option<SocketId>,
    transport: T,
}

impl<T: Transport> Connection<T> {
    /// Creates a disconnected connection.
    #[must_use]
    pub fn new(endpoint: Endpoint, transport: T) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            endpoint,
            socket: None,
            transport,
        }
    }

    /// Returns the current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns `true` when the state is [`ConnectionState::Connected`].
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Returns the endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the current socket, if any.
    #[inline]
    #[must_use]
    pub const fn socket(&self) -> Option<SocketId> {
        self.socket
    }

    /// Returns `true` if `socket` is the current socket.
    #[inline]
    #[must_use]
    pub fn is_current(&self, socket: SocketId) -> bool {
        self.socket == Some(socket)
    }

    /// Returns the transport.
    #[inline]
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a text frame on the current socket.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] unless the state is `Connected`
    /// - [`Error::ConnectionClosed`] if the transport lost the socket
    pub fn send_frame(&mut self, frame: String) -> Result<()> {
        match self.socket {
            Some(socket) if self.is_connected() => self.transport.send(socket, frame),
            _ => Err(Error::NotConnected),
        }
    }

    /// Detaches the old socket, then starts a new connect attempt.
    pub(crate) fn replace_socket(&mut self) -> SocketId {
        if let Some(old) = self.socket.take() {
            self.transport.detach(old);
        }

        self.state = ConnectionState::Connecting;
        let socket = self.transport.connect(&self.endpoint);
        self.socket = Some(socket);

        debug!(%socket, endpoint = %self.endpoint, "Connect attempt issued");
        socket
    }

    /// Sets the state, returning the previous one.
    pub(crate) fn transition(&mut self, next: ConnectionState) -> ConnectionState {
        let previous = self.state;
        self.state = next;
        if previous != next {
            debug!(from = %previous, to = %next, "Connection state changed");
        }
        previous
    }

    /// Closes and detaches the current socket.
    pub(crate) fn release(&mut self) {
        if let Some(socket) = self.socket.take() {
            self.transport.close(socket);
            self.transport.detach(socket);
        }
        self.state = ConnectionState::Disconnected;
    }
}

// ============================================================================
// Tests
// ============================================================================
