//! Button registry.
//!
//! An ordered, in-memory list of buttons. Insertion order is display order,
//! duplicates are allowed and a button's identity is its position. Nothing
//! is persisted.
//!
//! # Example
//!
//! ```
//! use replpad::{Preset, Remote};
//!
//! # fn example() -> replpad::Result<()> {
//! let remote = Remote::builder().build()?;
//! let mut buttons = remote.button_registry();
//!
//! buttons.add(None, "(save-buffer)");
//! buttons.add_preset(Preset::MultipleWindows);
//! assert_eq!(buttons.len(), 6);
//! assert_eq!(buttons.get(0).unwrap().label(), "save-buffer");
//!
//! buttons.remove_selected([0, 1]);
//! assert_eq!(buttons.get(0).unwrap().label(), "Next window");
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::context::RemoteContext;
use crate::error::Result;

use super::label::{derive_label, truncate_label};
use super::preset::Preset;

// ============================================================================
// Button
// ============================================================================

/// A user-invocable action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Display label, at most 20 characters.
    label: String,
    /// Opaque command payload.
    command: String,
}

impl Button {
    /// Creates a button, truncating the label if needed.
    #[must_use]
    pub fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: truncate_label(label.into()),
            command: command.into(),
        }
    }

    /// Returns the label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the command.
    #[inline]
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

// ============================================================================
// ButtonRegistry
// ============================================================================

/// Ordered collection of [`Button`]s backing the rendered button list.
///
/// The registry is the only writer of its buttons. Every change in
/// composition is announced through
/// [`UiSink::buttons_changed`](crate::UiSink::buttons_changed).
pub struct ButtonRegistry {
    ctx: Arc<RemoteContext>,
    buttons: Vec<Button>,
}

impl fmt::Debug for ButtonRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonRegistry")
            .field("buttons", &self.buttons)
            .finish_non_exhaustive()
    }
}

impl ButtonRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(ctx: Arc<RemoteContext>) -> Self {
        Self {
            ctx,
            buttons: Vec::new(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the number of buttons.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Returns `true` if there are no buttons.
    ///
    /// The UI uses this to disable its remove action.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Returns the button at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    /// Iterates over the buttons in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter()
    }

    /// Returns the current labels, as listed by a removal dialog.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.buttons.iter().map(|b| b.label.clone()).collect()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Appends a button.
    ///
    /// Blank commands are ignored. A blank or missing label is derived from
    /// the command. Returns `true` if a button was added.
    pub fn add(&mut self, label: Option<&str>, command: &str) -> bool {
        let added = self.push(label, command);
        if added {
            self.ctx.sink().buttons_changed();
        }
        added
    }

    /// Appends every entry of `preset`, in order.
    ///
    /// Returns the number of buttons added.
    pub fn add_preset(&mut self, preset: Preset) -> usize {
        let mut added = 0;
        for entry in preset.entries() {
            if self.push(Some(entry.label), entry.command) {
                added += 1;
            }
        }

        debug!(%preset, added, "Preset added");
        if added > 0 {
            self.ctx.sink().buttons_changed();
        }
        added
    }

    /// Appends the preset called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPreset`](crate::Error::UnknownPreset) if no
    /// preset has that name.
    pub fn add_preset_named(&mut self, name: &str) -> Result<usize> {
        let preset = name.parse::<Preset>()?;
        Ok(self.add_preset(preset))
    }

    /// Removes the buttons at the given positions.
    ///
    /// Positions refer to the list as it was before the call. Out-of-range
    /// and repeated positions are ignored; the survivors keep their order.
    /// Returns the number of buttons removed.
    pub fn remove_selected(&mut self, indices: impl IntoIterator<Item = usize>) -> usize {
        let selected: FxHashSet<usize> = indices.into_iter().collect();
        if selected.is_empty() {
            return 0;
        }

        let before = self.buttons.len();
        let mut position = 0;
        self.buttons.retain(|_| {
            let keep = !selected.contains(&position);
            position += 1;
            keep
        });

        let removed = before - self.buttons.len();
        debug!(removed, remaining = self.buttons.len(), "Buttons removed");
        if removed > 0 {
            self.ctx.sink().buttons_changed();
        }
        removed
    }

    fn push(&mut self, label: Option<&str>, command: &str) -> bool {
        if command.trim().is_empty() {
            trace!("Ignoring button with blank command");
            return false;
        }

        let label = match label.filter(|l| !l.trim().is_empty()) {
            Some(label) => label.to_owned(),
            None => derive_label(command),
        };

        self.buttons.push(Button::new(label, command));
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
