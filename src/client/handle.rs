//! UI-facing handle to the connection actor.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tokio::sync::{mpsc, oneshot, watch};

use crate::buttons::ButtonRegistry;
use crate::error::{Error, Result};

use super::actor::ClientCommand;

// ============================================================================
// RemoteHandle
// ============================================================================

/// Cloneable handle used by buttons and the rest of the UI.
///
/// Every clone talks to the same connection actor. Dropping the last clone
/// shuts the actor down.
#[derive(Clone)]
pub struct RemoteHandle {
    /// Channel for sending commands to the actor.
    command_tx: mpsc::UnboundedSender<ClientCommand>,
    /// Connectivity published by the actor.
    connected: watch::Receiver<bool>,
}

impl fmt::Debug for RemoteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteHandle")
            .field("connected", &self.is_connected())
            .field("closed", &self.command_tx.is_closed())
            .finish()
    }
}

impl RemoteHandle {
    pub(crate) fn new(
        command_tx: mpsc::UnboundedSender<ClientCommand>,
        connected: watch::Receiver<bool>,
    ) -> Self {
        Self {
            command_tx,
            connected,
        }
    }

    /// Sends a command to the remote interpreter.
    ///
    /// Resolves once the frame is queued on the socket; the remote's
    /// reaction, if any, arrives later as a display payload.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if no connection is open
    /// - [`Error::ConnectionClosed`] if the actor has shut down
    pub async fn execute(&self, command: impl Into<String>) -> Result<()> {
        let (reply, response) = oneshot::channel();

        self.command_tx
            .send(ClientCommand::Execute {
                command: command.into(),
                reply,
            })
            .map_err(|_| Error::ConnectionClosed)?;

        response.await?
    }

    /// Executes the command of the button at `index`.
    ///
    /// # Errors
    ///
    /// - [`Error::ButtonNotFound`] if `index` is out of range
    /// - anything [`execute`](Self::execute) returns
    pub async fn press(&self, buttons: &ButtonRegistry, index: usize) -> Result<()> {
        let command = buttons
            .get(index)
            .map(|button| button.command().to_owned())
            .ok_or(Error::ButtonNotFound { index })?;

        self.execute(command).await
    }

    /// Returns `true` while the connection is open.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        *self.connected.borrow()
    }

    /// Waits until the connection is open.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the actor stops first.
    pub async fn wait_connected(&self) -> Result<()> {
        let mut connected = self.connected.clone();
        connected
            .wait_for(|open| *open)
            .await
            .map_err(|_| Error::ConnectionClosed)?;
        Ok(())
    }

    /// Closes the connection and stops reconnecting.
    ///
    /// Returns once the actor has released the socket. Calling it again,
    /// from any clone, is a no-op.
    pub async fn shutdown(&self) {
        let (done, finished) = oneshot::channel();
        if self
            .command_tx
            .send(ClientCommand::Shutdown { done })
            .is_ok()
        {
            let _ = finished.await;
        }
    }
}
