//! WebSocket transport.
//!
//! Each connect attempt spawns one tokio task that owns the
//! `WebSocketStream` for its whole life. The task handles:
//!
//! - Dialling the endpoint (`connect_async`)
//! - Incoming text frames, forwarded as [`SocketEvent::Message`]
//! - Outgoing frames queued by [`Transport::send`]
//! - Emitting exactly one [`SocketEvent::Closed`] when it ends
//!
//! Events pass through an attachment flag, so a detached socket falls
//! silent even if its task is still winding down.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::{SinkExt, StreamExt};
use rustc_hash::FxHashMap;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, trace, warn};

use crate::config::Endpoint;
use crate::error::{Error, Result};
use crate::identifiers::SocketId;

use super::{SocketEvent, Transport, TransportEvent};

// ============================================================================
// SocketCommand
// ============================================================================

/// Internal commands for a socket task.
enum SocketCommand {
    /// Write a text frame.
    Send(String),
    /// Close the stream gracefully.
    Close,
}

// ============================================================================
// SocketHandle
// ============================================================================

/// Manager-side half of a live socket task.
struct SocketHandle {
    /// Channel for sending commands to the socket task.
    outgoing: mpsc::UnboundedSender<SocketCommand>,
    /// Cleared on detach; the task stops emitting once it reads `false`.
    attached: Arc<AtomicBool>,
}

// ============================================================================
// EventEmitter
// ============================================================================

/// Task-side half: tags events with the socket id and honours detachment.
struct EventEmitter {
    socket: SocketId,
    attached: Arc<AtomicBool>,
    events: mpsc::UnboundedSender<TransportEvent>,
}

impl EventEmitter {
    fn emit(&self, kind: SocketEvent) {
        if !self.attached.load(Ordering::Acquire) {
            trace!(socket = %self.socket, ?kind, "Dropping event from detached socket");
            return;
        }

        let event = TransportEvent {
            socket: self.socket,
            kind,
        };
        if self.events.send(event).is_err() {
            trace!(socket = %self.socket, "Event receiver dropped");
        }
    }
}

// ============================================================================
// WsTransport
// ============================================================================

/// [`Transport`] over tokio-tungstenite.
///
/// Must be used from within a tokio runtime: [`Transport::connect`]
/// spawns the socket task.
pub struct WsTransport {
    /// Sender cloned into every socket task.
    events: mpsc::UnboundedSender<TransportEvent>,
    /// Attached sockets by id.
    sockets: FxHashMap<SocketId, SocketHandle>,
    /// Id handed to the next connect attempt.
    next_id: SocketId,
}

impl WsTransport {
    /// Creates a transport and the receiver its events arrive on.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let transport = Self {
            events,
            sockets: FxHashMap::default(),
            next_id: SocketId::new(1),
        };
        (transport, events_rx)
    }

    /// Returns the number of attached sockets.
    #[inline]
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.sockets.len()
    }
}

impl Transport for WsTransport {
    fn connect(&mut self, endpoint: &Endpoint) -> SocketId {
        let socket = self.next_id;
        self.next_id = socket.next();

        let (outgoing, commands) = mpsc::unbounded_channel();
        let attached = Arc::new(AtomicBool::new(true));
        let emitter = EventEmitter {
            socket,
            attached: Arc::clone(&attached),
            events: self.events.clone(),
        };

        tokio::spawn(run_socket(endpoint.ws_url(), commands, emitter));

        self.sockets
            .insert(socket, SocketHandle { outgoing, attached });
        socket
    }

    fn send(&mut self, socket: SocketId, frame: String) -> Result<()> {
        let handle = self.sockets.get(&socket).ok_or(Error::ConnectionClosed)?;
        handle
            .outgoing
            .send(SocketCommand::Send(frame))
            .map_err(|_| Error::ConnectionClosed)
    }

    fn detach(&mut self, socket: SocketId) {
        // Dropping the handle also drops `outgoing`, which ends the task.
        if let Some(handle) = self.sockets.remove(&socket) {
            handle.attached.store(false, Ordering::Release);
            debug!(%socket, "Socket detached");
        }
    }

    fn close(&mut self, socket: SocketId) {
        if let Some(handle) = self.sockets.get(&socket) {
            let _ = handle.outgoing.send(SocketCommand::Close);
        }
    }
}

// ============================================================================
// Socket Task
// ============================================================================

/// Dials `url` and pumps frames until either side closes.
async fn run_socket(
    url: String,
    mut commands: mpsc::UnboundedReceiver<SocketCommand>,
    emitter: EventEmitter,
) {
    info!(socket = %emitter.socket, %url, "Trying to connect");

    let ws_stream = match connect_async(url.as_str()).await {
        Ok((ws_stream, _response)) => ws_stream,
        Err(e) => {
            debug!(socket = %emitter.socket, error = %e, "Connect attempt failed");
            emitter.emit(SocketEvent::Closed {
                reason: Some(e.to_string()),
            });
            return;
        }
    };

    emitter.emit(SocketEvent::Opened);

    let (mut ws_write, mut ws_read) = ws_stream.split();

    let reason = loop {
        tokio::select! {
            // Incoming frames from the remote
            message = ws_read.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        emitter.emit(SocketEvent::Message(text.as_str().to_owned()));
                    }

                    Some(Ok(Message::Close(frame))) => {
                        debug!(socket = %emitter.socket, "WebSocket closed by remote");
                        // Flushes the close reply queued by tungstenite
                        let _ = ws_write.close().await;
                        break frame.map(|f| f.reason.as_str().to_owned());
                    }

                    Some(Err(e)) => {
                        warn!(socket = %emitter.socket, error = %e, "WebSocket error");
                        break Some(e.to_string());
                    }

                    None => {
                        debug!(socket = %emitter.socket, "WebSocket stream ended");
                        break None;
                    }

                    // Ignore Binary, Ping, Pong, Frame
                    Some(Ok(_)) => {}
                }
            }

            // Frames queued by the manager
            command = commands.recv() => {
                match command {
                    Some(SocketCommand::Send(frame)) => {
                        if let Err(e) = ws_write.send(Message::Text(frame.into())).await {
                            warn!(socket = %emitter.socket, error = %e, "Failed to send frame");
                            break Some(e.to_string());
                        }
                        trace!(socket = %emitter.socket, "Frame sent");
                    }

                    Some(SocketCommand::Close) | None => {
                        debug!(socket = %emitter.socket, "Closing socket");
                        let _ = ws_write.close().await;
                        break None;
                    }
                }
            }
        }
    };

    emitter.emit(SocketEvent::Closed { reason });
    debug!(socket = %emitter.socket, "Socket task terminated");
}

// ============================================================================
// Tests
// ============================================================================
