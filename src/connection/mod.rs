//! Connection lifecycle.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConnectionState`] | `Disconnected` / `Connecting` / `Connected` |
//! | [`Connection`] | State plus the single owned socket handle |
//! | [`ConnectionManager`] | Connect, handshake, reconnect policy |

// ============================================================================
// Submodules
// ============================================================================

/// Reconnecting state machine.
pub mod manager;

/// Connection state and socket slot.
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use manager::ConnectionManager;
pub use state::{Connection, ConnectionState};
