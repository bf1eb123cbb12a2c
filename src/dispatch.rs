//! Command dispatcher.
//!
//! Turns command strings into wire frames on the way out and wire frames
//! into display payloads on the way in. Sending is fire-and-forget: nothing
//! waits for the remote to acknowledge a command.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::trace;

use crate::connection::Connection;
use crate::context::RemoteContext;
use crate::error::{Error, Result};
use crate::protocol::{InboundMessage, OutboundMessage};
use crate::transport::Transport;

// ============================================================================
// CommandDispatcher
// ============================================================================

/// Serializes outbound messages and forwards inbound payloads to the UI.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    ctx: Arc<RemoteContext>,
}

impl CommandDispatcher {
    /// Creates a dispatcher bound to `ctx`.
    #[must_use]
    pub fn new(ctx: Arc<RemoteContext>) -> Self {
        Self { ctx }
    }

    /// Sends the handshake frame `{}`.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub fn handshake<T: Transport>(&self, connection: &mut Connection<T>) -> Result<()> {
        self.send(connection, &OutboundMessage::handshake())
    }

    /// Sends `{"code": command}`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if the connection is not open
    /// - [`Error::ConnectionClosed`] if the socket went away underneath
    pub fn execute<T: Transport>(&self, connection: &mut Connection<T>, command: &str) -> Result<()> {
        self.send(connection, &OutboundMessage::command(command))
    }

    /// Parses an inbound frame and hands the payload to the display sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMessage`] if the frame is not JSON; the
    /// sink is not called in that case.
    pub fn deliver(&self, frame: &str) -> Result<()> {
        let message = InboundMessage::parse(frame)?;
        self.ctx.sink().display_received(message.into_payload());
        Ok(())
    }

    fn send<T: Transport>(
        &self,
        connection: &mut Connection<T>,
        message: &OutboundMessage,
    ) -> Result<()> {
        if !connection.is_connected() {
            return Err(Error::NotConnected);
        }

        let frame = message.to_frame()?;
        trace!(handshake = message.is_handshake(), %frame, "Dispatching frame");
        connection.send_frame(frame)
    }
}

// ============================================================================
// Tests
// ============================================================================
