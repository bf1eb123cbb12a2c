//! Outbound message types.
//!
//! # Format
//!
//! Handshake, sent once right after the socket opens:
//! ```json
//! {}
//! ```
//!
//! Command:
//! ```json
//! { "code": "(recenter-top-bottom)" }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use serde_json::to_string;

use crate::error::Result;

// ============================================================================
// OutboundMessage
// ============================================================================

/// A frame sent from this client to the remote interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    /// Announces that a client attached. Carries no fields.
    Handshake {},

    /// An opaque command for the remote interpreter.
    Command {
        /// Command text, sent verbatim.
        code: String,
    },
}

impl OutboundMessage {
    /// Creates the handshake message.
    #[inline]
    #[must_use]
    pub const fn handshake() -> Self {
        Self::Handshake {}
    }

    /// Creates a command message.
    #[inline]
    #[must_use]
    pub fn command(code: impl Into<String>) -> Self {
        Self::Command { code: code.into() }
    }

    /// Returns `true` for the handshake.
    #[inline]
    #[must_use]
    pub const fn is_handshake(&self) -> bool {
        matches!(self, Self::Handshake {})
    }

    /// Serializes the message into a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    pub fn to_frame(&self) -> Result<String> {
        Ok(to_string(self)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
