//! Raw cell text and its numeric reading
//!
//! Grids store the text exactly as the user typed it. The numeric
//! reading is total: anything that does not parse to a finite number,
//! including the empty string, reads as 0. Computations never see the
//! raw text; narration does.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places kept when rounding inverse entries
pub const INVERSE_DECIMALS: u32 = 4;

/// One grid cell as entered: possibly empty, junk, or a number
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawCell(String);

impl RawCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Render a computed number back into cell text
    pub fn from_value(value: f64) -> Self {
        Self(fmt_num(value))
    }

    /// The text exactly as entered
    pub fn text(&self) -> &str {
        &self.0
    }

    /// True when the trimmed text is empty
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Parse the cell to a finite number, if it is one
    ///
    /// Leading/trailing whitespace is ignored and the Unicode minus
    /// sign (U+2212) is accepted as a sign. `inf` and `NaN` spellings
    /// parse but are rejected as non-finite.
    pub fn checked(&self) -> Option<f64> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized = trimmed.replace('\u{2212}', "-");
        match normalized.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    /// Total numeric reading: malformed cells count as 0
    pub fn value(&self) -> f64 {
        self.checked().unwrap_or(0.0)
    }
}

impl From<&str> for RawCell {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for RawCell {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        Self::from_value(value)
    }
}

impl From<i64> for RawCell {
    fn from(value: i64) -> Self {
        Self::from_value(value as f64)
    }
}

impl From<i32> for RawCell {
    fn from(value: i32) -> Self {
        Self::from_value(value as f64)
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// Format a number the way derivations and rendered cells show it
///
/// Uses the shortest round-trip form (`24`, `0.5`, `0.3333`); negative
/// zero prints as plain `0`.
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}
