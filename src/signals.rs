//! Core → UI signals.
//!
//! The view layer (indicator panels, display renderer, button list) is not
//! part of this crate. It plugs in through [`UiSink`], which receives three
//! signals:
//!
//! | Signal | Emitted by | When |
//! |--------|------------|------|
//! | `connectivity_changed` | connection manager | socket opened or closed |
//! | `display_received` | command dispatcher | inbound frame parsed |
//! | `buttons_changed` | button registry | composition changed |
//!
//! Every call happens on the thread of the component that emits it; sinks
//! must not block.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

// ============================================================================
// UiSink
// ============================================================================

/// Receiver of the signals the core emits toward the UI.
pub trait UiSink: Send + Sync {
    /// The connection opened (`true`) or closed (`false`).
    fn connectivity_changed(&self, connected: bool);

    /// The remote pushed a display payload.
    fn display_received(&self, payload: Value);

    /// The button registry gained or lost entries.
    fn buttons_changed(&self);
}

// ============================================================================
// Signal
// ============================================================================

/// A [`UiSink`] call captured as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// See [`UiSink::connectivity_changed`].
    ConnectivityChanged(bool),
    /// See [`UiSink::display_received`].
    DisplayReceived(Value),
    /// See [`UiSink::buttons_changed`].
    ButtonsChanged,
}

// ============================================================================
// ChannelSink
// ============================================================================

/// Sink that forwards every signal into an unbounded channel.
///
/// Lets an async UI loop consume signals with `recv().await`.
///
/// # Example
///
/// ```ignore
/// let (sink, mut signals) = ChannelSink::new();
/// let remote = Remote::builder().sink(Arc::new(sink)).build()?;
///
/// while let Some(signal) = signals.recv().await {
///     render(signal);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Signal>,
}

impl ChannelSink {
    /// Creates a sink and the receiver that drains it.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Signal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, signal: Signal) {
        if self.tx.send(signal).is_err() {
            trace!("Signal receiver dropped");
        }
    }
}

impl UiSink for ChannelSink {
    fn connectivity_changed(&self, connected: bool) {
        self.forward(Signal::ConnectivityChanged(connected));
    }

    fn display_received(&self, payload: Value) {
        self.forward(Signal::DisplayReceived(payload));
    }

    fn buttons_changed(&self) {
        self.forward(Signal::ButtonsChanged);
    }
}

// ============================================================================
// TracingSink
// ============================================================================

/// Sink that only logs. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl UiSink for TracingSink {
    fn connectivity_changed(&self, connected: bool) {
        info!(connected, "Connectivity changed");
    }

    fn display_received(&self, payload: Value) {
        debug!(%payload, "Display payload received");
    }

    fn buttons_changed(&self) {
        debug!("Buttons changed");
    }
}

// ============================================================================
// Tests
// ============================================================================
