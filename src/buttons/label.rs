//! Button label derivation and truncation.

// ============================================================================
// Imports
// ============================================================================

use std::iter;
use std::sync::LazyLock;

use regex::Regex;

// ============================================================================
// Constants
// ============================================================================

/// Longest label kept as is, in characters.
pub const MAX_LABEL_CHARS: usize = 20;

/// Characters kept in front of the ellipsis when truncating.
const TRUNCATED_PREFIX_CHARS: usize = 17;

/// Marker appended to truncated labels.
pub const ELLIPSIS: char = '…';

/// Skips leading whitespace and parentheses, captures the next token.
///
/// The token ends at any whitespace, plain spaces included, so arguments
/// never reach the label: `(other-window -1)` becomes `other-window`.
static LEADING_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s()]*([^\s()]+)").expect("leading token pattern is valid")
});

// ============================================================================
// Functions
// ============================================================================

/// Derives a label from a command.
///
/// `(split-window nil nil t)` becomes `split-window`. A command with no
/// token at all falls back to the command stripped of every parenthesis
/// and whitespace character.
#[must_use]
pub fn derive_label(command: &str) -> String {
    match LEADING_TOKEN.captures(command).and_then(|caps| caps.get(1)) {
        Some(token) => token.as_str().to_owned(),
        None => command
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')'))
            .collect(),
    }
}

/// Shortens labels over [`MAX_LABEL_CHARS`] to 17 characters plus `…`.
#[must_use]
pub fn truncate_label(label: String) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label;
    }

    label
        .chars()
        .take(TRUNCATED_PREFIX_CHARS)
        .chain(iter::once(ELLIPSIS))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
