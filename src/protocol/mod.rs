//! WebSocket protocol message types.
//!
//! This module defines the message format for communication between this
//! client and the remote interpreter.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `OutboundMessage::Handshake` | Local → Remote | Announce a client after open |
//! | `OutboundMessage::Command` | Local → Remote | Run an opaque command |
//! | `InboundMessage` | Remote → Local | Display payload |
//!
//! There is no request/response correlation: commands are fire-and-forget
//! and the remote pushes display updates whenever it likes.

// ============================================================================
// Submodules
// ============================================================================

/// Inbound display payloads.
pub mod inbound;

/// Outbound handshake and command frames.
pub mod outbound;

// ============================================================================
// Re-exports
// ============================================================================

pub use inbound::InboundMessage;
pub use outbound::OutboundMessage;
