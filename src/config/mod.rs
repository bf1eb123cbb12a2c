//! Remote configuration.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Endpoint`] | `host:port/path` of the remote interpreter |
//! | [`RemoteConfig`] | Endpoint plus reconnect delay |
//! | [`RemoteBuilder`] | Fluent, validating builder for [`Remote`](crate::Remote) |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for remote configuration.
pub mod builder;

/// Endpoint address parsing.
pub mod endpoint;

/// Connection options and defaults.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::RemoteBuilder;
pub use endpoint::Endpoint;
pub use options::{DEFAULT_ENDPOINT, DEFAULT_RECONNECT_DELAY, RemoteConfig};
