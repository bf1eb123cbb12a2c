//! Transport layer.
//!
//! The transport owns socket handles and turns their I/O into
//! [`TransportEvent`]s. It has no business logic: deciding when to connect,
//! what to send and how to react to a close belongs to the
//! [`ConnectionManager`](crate::connection::ConnectionManager).
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐                          ┌──────────────────┐
//! │ ConnectionManager │  connect/send/detach     │  WsTransport     │
//! │                   │─────────────────────────►│   socket task #n │──► remote
//! │                   │◄─────────────────────────│                  │
//! └───────────────────┘  TransportEvent{socket}  └──────────────────┘
//! ```
//!
//! Every connect attempt produces a fresh [`SocketId`]. Detaching a socket
//! guarantees none of its events reach the manager afterwards.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `timer` | tokio-backed reconnect timer |
//! | `websocket` | tokio-tungstenite socket tasks |

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::config::Endpoint;
use crate::error::Result;
use crate::identifiers::SocketId;

// ============================================================================
// Submodules
// ============================================================================

/// Reconnect timer backed by `tokio::time`.
pub mod timer;

/// WebSocket transport backed by tokio-tungstenite.
pub mod websocket;

// ============================================================================
// Re-exports
// ============================================================================

pub use timer::{ReconnectDue, TokioTimer};
pub use websocket::WsTransport;

// ============================================================================
// Transport
// ============================================================================

/// Owner of socket handles.
pub trait Transport {
    /// Starts a connection attempt and returns the new socket's id.
    ///
    /// The outcome arrives later as [`SocketEvent::Opened`] or
    /// [`SocketEvent::Closed`].
    fn connect(&mut self, endpoint: &Endpoint) -> SocketId;

    /// Queues a text frame on a socket.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`](crate::Error::ConnectionClosed)
    /// if the socket is unknown or already gone.
    fn send(&mut self, socket: SocketId, frame: String) -> Result<()>;

    /// Detaches the socket's event handlers and releases the handle.
    ///
    /// No event for `socket` is delivered after this returns.
    fn detach(&mut self, socket: SocketId);

    /// Asks the socket to close gracefully.
    fn close(&mut self, socket: SocketId);
}

// ============================================================================
// Timer
// ============================================================================

/// One-shot timer used to delay reconnect attempts.
///
/// Expiry is reported back to the owner out of band (see
/// [`ReconnectDue`]); the trait only arms and disarms it.
pub trait Timer {
    /// Arms the timer to fire once after `delay`.
    fn schedule(&mut self, delay: Duration);

    /// Disarms any pending expiry.
    fn cancel(&mut self);
}

// ============================================================================
// TransportEvent
// ============================================================================

/// A lifecycle event from one socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportEvent {
    /// Socket the event came from.
    pub socket: SocketId,
    /// What happened.
    pub kind: SocketEvent,
}

/// What happened on a socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// The stream is established.
    Opened,
    /// A text frame arrived.
    Message(String),
    /// The stream ended, or never came up.
    Closed {
        /// Reason reported by the peer or the I/O layer, if any.
        reason: Option<String>,
    },
}

impl TransportEvent {
    /// Creates an opened event.
    #[inline]
    #[must_use]
    pub const fn opened(socket: SocketId) -> Self {
        Self {
            socket,
            kind: SocketEvent::Opened,
        }
    }

    /// Creates a message event.
    #[inline]
    #[must_use]
    pub fn message(socket: SocketId, text: impl Into<String>) -> Self {
        Self {
            socket,
            kind: SocketEvent::Message(text.into()),
        }
    }

    /// Creates a closed event.
    #[inline]
    #[must_use]
    pub const fn closed(socket: SocketId, reason: Option<String>) -> Self {
        Self {
            socket,
            kind: SocketEvent::Closed { reason },
        }
    }
}
