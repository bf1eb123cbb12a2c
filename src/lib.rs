//! replpad - a button pad for a remote command interpreter.
//!
//! This library keeps one persistent WebSocket connection to a remote
//! interpreter, sends opaque command strings when the user presses a
//! button, and hands whatever the remote pushes back to a display sink.
//!
//! # Architecture
//!
//! ```text
//!   UI (excluded) ──execute()──► RemoteHandle ──► actor task
//!        ▲                                          │
//!        │ UiSink signals                           ▼
//!        └────────────── ConnectionManager ──► CommandDispatcher ──► WsTransport ──► remote
//! ```
//!
//! Key design principles:
//!
//! - One connection per process; the socket is replaced, never reused
//! - Reconnect forever after a fixed delay, at most one timer pending
//! - Handshake `{}` precedes every other frame on a connection
//! - Commands are fire-and-forget; no request/response correlation
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use replpad::{ChannelSink, Preset, Remote, Result, Signal};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let (sink, mut signals) = ChannelSink::new();
//!     let remote = Remote::builder()
//!         .endpoint("192.168.1.24:8000/socket")
//!         .sink(Arc::new(sink))
//!         .build()?;
//!
//!     let handle = remote.spawn()?;
//!     let mut buttons = remote.button_registry();
//!     buttons.add_preset(Preset::Navigation);
//!
//!     handle.wait_connected().await?;
//!     handle.press(&buttons, 0).await?;
//!
//!     while let Some(signal) = signals.recv().await {
//!         if let Signal::DisplayReceived(payload) = signal {
//!             println!("{payload}");
//!             break;
//!         }
//!     }
//!
//!     handle.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`buttons`] | [`Button`], [`ButtonRegistry`], [`Preset`] |
//! | [`client`] | [`RemoteHandle`] and the connection actor |
//! | [`config`] | [`Endpoint`], [`RemoteConfig`], [`RemoteBuilder`] |
//! | [`connection`] | [`ConnectionManager`] state machine |
//! | [`context`] | [`Remote`] and the shared [`RemoteContext`] |
//! | [`dispatch`] | [`CommandDispatcher`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | [`SocketId`] |
//! | [`protocol`] | Wire message types |
//! | [`signals`] | [`UiSink`] and ready-made sinks |
//! | [`transport`] | [`Transport`] trait and the WebSocket implementation |

// ============================================================================
// Modules
// ============================================================================

/// User-configurable buttons.
pub mod buttons;

/// Async client: connection actor and UI-facing handle.
pub mod client;

/// Endpoint and reconnect configuration.
pub mod config;

/// Connection lifecycle state machine.
pub mod connection;

/// Process-wide context and entry point.
pub mod context;

/// Outbound command serialization and inbound payload delivery.
pub mod dispatch;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// WebSocket protocol message types.
pub mod protocol;

/// Core → UI signals.
pub mod signals;

/// Socket ownership and reconnect timing.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Button types
pub use buttons::{Button, ButtonRegistry, Preset, PresetEntry};

// Client types
pub use client::RemoteHandle;

// Configuration types
pub use config::{DEFAULT_ENDPOINT, DEFAULT_RECONNECT_DELAY, Endpoint, RemoteBuilder, RemoteConfig};

// Connection types
pub use connection::{Connection, ConnectionManager, ConnectionState};

// Context types
pub use context::{Remote, RemoteContext};

// Dispatch types
pub use dispatch::CommandDispatcher;

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::SocketId;

// Protocol types
pub use protocol::{InboundMessage, OutboundMessage};

// Signal types
pub use signals::{ChannelSink, Signal, TracingSink, UiSink};

// Transport types
pub use transport::{SocketEvent, Timer, TokioTimer, Transport, TransportEvent, WsTransport};
