//! Inbound message types.
//!
//! The remote pushes arbitrary JSON meant for the display. Nothing here
//! looks inside it.

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Value, from_str};

use crate::error::{Error, Result};

// ============================================================================
// InboundMessage
// ============================================================================

/// A display payload pushed by the remote interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    payload: Value,
}

impl InboundMessage {
    /// Parses a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMessage`] if the frame is not valid JSON.
    pub fn parse(frame: &str) -> Result<Self> {
        let payload =
            from_str::<Value>(frame).map_err(|e| Error::malformed_message(e.to_string()))?;
        Ok(Self { payload })
    }

    /// Returns the payload.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Consumes the message, returning the payload.
    #[inline]
    #[must_use]
    pub fn into_payload(self) -> Value {
        self.payload
    }
}

// ============================================================================
// Tests
// ============================================================================
