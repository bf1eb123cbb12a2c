//! Async client.
//!
//! Runs the connection manager on a tokio task and exposes it to the UI
//! through [`RemoteHandle`].
//!
//! | Module | Description |
//! |--------|-------------|
//! | `actor` | The task that owns the manager |
//! | `handle` | Cloneable, UI-facing handle |

// ============================================================================
// Submodules
// ============================================================================

/// Connection actor.
pub(crate) mod actor;

/// UI-facing handle.
pub mod handle;

// ============================================================================
// Re-exports
// ============================================================================

pub(crate) use actor::spawn;
pub use handle::RemoteHandle;
