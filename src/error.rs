//! Error types for replpad.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use replpad::{Error, RemoteHandle, Result};
//!
//! async fn recenter(remote: &RemoteHandle) -> Result<()> {
//!     match remote.execute("(recenter-top-bottom)").await {
//!         Err(Error::NotConnected) => Ok(()), // indicator already says so
//!         other => other,
//!     }
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::UnknownPreset`] |
//! | Buttons | [`Error::ButtonNotFound`] |
//! | Connection | [`Error::ConnectFailed`], [`Error::NotConnected`], [`Error::ConnectionClosed`], [`Error::AlreadySpawned`] |
//! | Protocol | [`Error::MalformedMessage`] |
//! | External | [`Error::Json`], [`Error::WebSocket`], [`Error::ChannelClosed`] |
//!
//! None of these are fatal to the process. `ConnectFailed` and
//! `MalformedMessage` are absorbed by the connection actor (logged, then
//! recovered); `NotConnected` is handed back to whoever called `execute`.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when the endpoint or reconnect delay is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Unknown button preset name.
    #[error("Unknown preset: {name}")]
    UnknownPreset {
        /// The name that matched no preset.
        name: String,
    },

    /// No button at the requested position.
    #[error("Button not found at position {index}")]
    ButtonNotFound {
        /// The requested position.
        index: usize,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// The transport could not establish the stream.
    ///
    /// Recovered automatically by the scheduled reconnect.
    #[error("Connect to {endpoint} failed: {message}")]
    ConnectFailed {
        /// Endpoint that was dialled.
        endpoint: String,
        /// Reason reported by the transport.
        message: String,
    },

    /// A command was dispatched while no connection is open.
    #[error("Not connected")]
    NotConnected,

    /// The socket or the connection actor went away mid-operation.
    #[error("Connection closed")]
    ConnectionClosed,

    /// The remote's connection actor is already running.
    #[error("Remote already spawned; use the existing RemoteHandle")]
    AlreadySpawned,

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Inbound frame could not be parsed.
    ///
    /// The payload is dropped; the connection stays open.
    #[error("Malformed message: {message}")]
    MalformedMessage {
        /// Parser diagnostic.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// Channel receive error.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an unknown preset error.
    #[inline]
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        Self::UnknownPreset { name: name.into() }
    }

    /// Creates a connect failed error.
    #[inline]
    pub fn connect_failed(endpoint: impl ToString, message: impl Into<String>) -> Self {
        Self::ConnectFailed {
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }

    /// Creates a malformed message error.
    #[inline]
    pub fn malformed_message(message: impl Into<String>) -> Self {
        Self::MalformedMessage {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::ConnectFailed { .. }
                | Self::NotConnected
                | Self::ConnectionClosed
                | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors clear up on their own once the remote endpoint
    /// is reachable again.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConnectFailed { .. }
                | Self::NotConnected
                | Self::ConnectionClosed
                | Self::MalformedMessage { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::connect_failed("10.0.0.2:8000/socket", "connection refused");
        assert_eq!(
            err.to_string(),
            "Connect to 10.0.0.2:8000/socket failed: connection refused"
        );
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("reconnect delay must be non-zero");
        assert_eq!(
            err.to_string(),
            "Configuration error: reconnect delay must be non-zero"
        );
    }

    #[test]
    fn test_not_connected_display() {
        assert_eq!(Error::NotConnected.to_string(), "Not connected");
    }

    #[test]
    fn test_is_connection_error() {
        assert!(Error::connect_failed("h:1/", "x").is_connection_error());
        assert!(Error::NotConnected.is_connection_error());
        assert!(Error::ConnectionClosed.is_connection_error());
        assert!(!Error::malformed_message("x").is_connection_error());
        assert!(!Error::config("x").is_connection_error());
    }

    #[test]
    fn test_already_spawned_is_not_recoverable() {
        assert!(!Error::AlreadySpawned.is_recoverable());
        assert!(!Error::AlreadySpawned.is_connection_error());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::NotConnected.is_recoverable());
        assert!(Error::malformed_message("eof").is_recoverable());
        assert!(!Error::unknown_preset("macros").is_recoverable());
        assert!(!Error::ButtonNotFound { index: 3 }.is_recoverable());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
