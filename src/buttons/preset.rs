//! Named button presets.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// ============================================================================
// PresetEntry
// ============================================================================

/// One `(label, command)` pair of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetEntry {
    /// Button label.
    pub label: &'static str,
    /// Command sent when pressed.
    pub command: &'static str,
}

const fn entry(label: &'static str, command: &'static str) -> PresetEntry {
    PresetEntry { label, command }
}

/// Buffer navigation and scrolling.
const NAVIGATION: &[PresetEntry] = &[
    entry("Recenter", "(recenter-top-bottom)"),
    // scroll-down moves the text down, i.e. the view up
    entry("Page up", "(scroll-down-command)"),
    entry("Page down", "(scroll-up-command)"),
    entry("First line", "(beginning-of-buffer)"),
    entry("Last line", "(end-of-buffer)"),
    entry("Previous buffer", "(previous-buffer)"),
    entry("Next buffer", "(next-buffer)"),
];

/// Window splitting and switching.
const MULTIPLE_WINDOWS: &[PresetEntry] = &[
    entry("Previous window", "(other-window -1)"),
    entry("Next window", "(other-window 1)"),
    entry("Split Horizontally", "(split-window)"),
    entry("Split Vertically", "(split-window nil nil t)"),
    entry("Close window", "(delete-window)"),
];

// ============================================================================
// Preset
// ============================================================================

/// A fixed, ordered set of buttons insertable in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// `navigation`
    Navigation,
    /// `multiple windows`
    MultipleWindows,
}

impl Preset {
    /// Every preset, in menu order.
    pub const ALL: [Self; 2] = [Self::Navigation, Self::MultipleWindows];

    /// Returns the preset's name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::MultipleWindows => "multiple windows",
        }
    }

    /// Returns the preset's entries in insertion order.
    #[inline]
    #[must_use]
    pub const fn entries(self) -> &'static [PresetEntry] {
        match self {
            Self::Navigation => NAVIGATION,
            Self::MultipleWindows => MULTIPLE_WINDOWS,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    /// Case-insensitive; `-` and `_` count as spaces.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");

        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == normalized)
            .ok_or_else(|| Error::unknown_preset(s))
    }
}

// ============================================================================
// Tests
// ============================================================================
