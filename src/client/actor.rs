//! Connection actor.
//!
//! One tokio task owns the [`ConnectionManager`] and serialises everything
//! that touches it:
//!
//! - Socket events from [`WsTransport`]
//! - Reconnect expiries from [`TokioTimer`]
//! - Commands from every [`RemoteHandle`] clone
//!
//! Because all three arrive on the same task, callbacks are delivered in
//! order and never overlap.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, trace};

use crate::connection::ConnectionManager;
use crate::context::RemoteContext;
use crate::error::Result;
use crate::transport::{ReconnectDue, TokioTimer, TransportEvent, WsTransport};

use super::handle::RemoteHandle;

// ============================================================================
// ClientCommand
// ============================================================================

/// Requests sent from handles to the actor.
pub(crate) enum ClientCommand {
    /// Send a command and report whether it went out.
    Execute {
        command: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Close the connection and stop the actor.
    Shutdown { done: oneshot::Sender<()> },
}

// ============================================================================
// Spawn
// ============================================================================

/// Starts the actor and issues the first connect attempt.
pub(crate) fn spawn(ctx: Arc<RemoteContext>) -> RemoteHandle {
    let (transport, events) = WsTransport::new();
    let (timer, due) = TokioTimer::new();
    let (command_tx, commands) = mpsc::unbounded_channel();
    let (connected_tx, connected_rx) = watch::channel(false);

    let manager = ConnectionManager::new(ctx, transport, timer);
    tokio::spawn(run(manager, events, due, commands, connected_tx));

    RemoteHandle::new(command_tx, connected_rx)
}

// ============================================================================
// Event Loop
// ============================================================================

type Manager = ConnectionManager<WsTransport, TokioTimer>;

async fn run(
    mut manager: Manager,
    mut events: mpsc::UnboundedReceiver<TransportEvent>,
    mut due: mpsc::UnboundedReceiver<ReconnectDue>,
    mut commands: mpsc::UnboundedReceiver<ClientCommand>,
    connected: watch::Sender<bool>,
) {
    manager.start();

    loop {
        tokio::select! {
            // Socket lifecycle and inbound frames
            Some(event) = events.recv() => {
                manager.handle_event(event);
            }

            // Reconnect delay elapsed
            Some(ReconnectDue) = due.recv() => {
                manager.reconnect_due();
            }

            // Requests from handles
            command = commands.recv() => {
                match command {
                    Some(ClientCommand::Execute { command, reply }) => {
                        let result = manager.execute(&command);
                        if let Err(e) = &result {
                            debug!(error = %e, "Command not dispatched");
                        }
                        let _ = reply.send(result);
                    }

                    Some(ClientCommand::Shutdown { done }) => {
                        manager.shutdown();
                        publish(&connected, &manager);
                        let _ = done.send(());
                        break;
                    }

                    None => {
                        debug!("All handles dropped");
                        manager.shutdown();
                        break;
                    }
                }
            }
        }

        publish(&connected, &manager);
    }

    trace!("Connection actor terminated");
}

/// Mirrors the manager's connectivity into the handles' watch channel.
fn publish(connected: &watch::Sender<bool>, manager: &Manager) {
    let now = manager.is_connected();
    connected.send_if_modified(|current| {
        if *current == now {
            return false;
        }
        *current = now;
        true
    });
}
