//! User-configurable buttons.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Button`] | `(label, command)` pair |
//! | [`ButtonRegistry`] | Ordered list with add / preset / remove |
//! | [`Preset`] | Named, fixed button sets |

// ============================================================================
// Submodules
// ============================================================================

/// Label derivation and truncation.
pub mod label;

/// Named presets.
pub mod preset;

/// The registry itself.
pub mod registry;

// ============================================================================
// Re-exports
// ============================================================================

pub use label::{ELLIPSIS, MAX_LABEL_CHARS, derive_label, truncate_label};
pub use preset::{Preset, PresetEntry};
pub use registry::{Button, ButtonRegistry};
