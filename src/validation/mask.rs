//! Keystroke masking for numeric text fields.
//!
//! While typing, a field only ever holds text shaped like an unsigned
//! decimal: digits, at most one point, digits. Anything else is dropped
//! without an error; validation happens at submit time.

use once_cell::sync::Lazy;
use regex::Regex;

static UNSIGNED_DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("valid unsigned decimal regex"));

/// Returns true if `candidate` may be stored in a numeric field.
///
/// ```
/// use job_worth::validation::accepts;
///
/// assert!(accepts(""));
/// assert!(accepts("12.5"));
/// assert!(accepts(".5"));
/// assert!(!accepts("1.2.3"));
/// assert!(!accepts("-3"));
/// ```
pub fn accepts(candidate: &str) -> bool {
    UNSIGNED_DECIMAL_RE.is_match(candidate)
}

/// A free-text field that only accepts masked input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskedField {
    value: String,
}

impl MaskedField {
    /// Creates an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the field's text if `candidate` passes the mask.
    ///
    /// Returns whether the candidate was accepted; a rejected candidate
    /// leaves the previous text in place.
    pub fn apply(&mut self, candidate: &str) -> bool {
        if accepts(candidate) {
            self.value = candidate.to_string();
            true
        } else {
            false
        }
    }

    /// The current text.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns true if the field is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.value.clear();
    }
}
