//! Raw response values and per-item ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A response exactly as it appears in the source table.
///
/// Numbers and text are distinct keys: `Number(1.0)` never equals `Text("1")`.
/// Integer and float cells are both numbers, so `1` and `1.0` are the same key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// True for a float NaN cell.
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Number(v) if v.is_nan())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Inclusive range of canonical values a single item can take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemRange {
    pub min: f64,
    pub max: f64,
}

impl ItemRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Flips a canonical value across the range: `(min + max) - value`.
    pub fn reverse(&self, value: f64) -> f64 {
        (self.min + self.max) - value
    }

    /// Range of a sum over `n_items` items drawn from this range.
    pub fn scaled(&self, n_items: usize) -> Self {
        let n = n_items as f64;
        Self::new(n * self.min, n * self.max)
    }
}

impl fmt::Display for ItemRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}
