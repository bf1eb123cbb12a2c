//! Type-safe identifiers.
//!
//! Newtype wrappers keep socket generations from being confused with
//! button positions or other plain integers.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// SocketId
// ============================================================================

/// Identifies one socket handle created by a [`Transport`](crate::transport::Transport).
///
/// Every connect attempt yields a fresh id; ids are never reused for the
/// lifetime of a transport, so an event tagged with an old id is always
/// recognisable as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SocketId(u64);

impl SocketId {
    /// Creates an id from its raw generation number.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw generation number.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "socket#{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
