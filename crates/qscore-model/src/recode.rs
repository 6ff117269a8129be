//! Recode tables mapping raw responses onto an instrument's canonical scale.

use serde::{Deserialize, Serialize};

use crate::instrument::ScaleItems;
use crate::value::RawValue;

/// Text tokens treated as missing unless a table overrides them.
pub const DEFAULT_MISSING_TOKENS: &[&str] = &["NaN"];

fn default_missing_tokens() -> Vec<String> {
    DEFAULT_MISSING_TOKENS
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// One raw code. An entry without a `value` is a missing sentinel (e.g. 999).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecodeEntry {
    pub raw: RawValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Outcome of looking up one raw cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recoded {
    Value(f64),
    /// Null cell, NaN, a missing token, or a declared sentinel.
    Missing,
    /// Present in the data but absent from the table.
    Unmapped,
}

/// Value-exact lookup table from raw responses to canonical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecodeTable {
    #[serde(default)]
    pub codes: Vec<RecodeEntry>,
    #[serde(default = "default_missing_tokens")]
    pub missing_tokens: Vec<String>,
    /// Numeric values absent from `codes` are kept unchanged.
    #[serde(default)]
    pub passthrough: bool,
}

impl Default for RecodeTable {
    fn default() -> Self {
        Self {
            codes: Vec::new(),
            missing_tokens: default_missing_tokens(),
            passthrough: false,
        }
    }
}

impl RecodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table that keeps every numeric response as-is.
    pub fn passthrough() -> Self {
        Self {
            passthrough: true,
            ..Self::default()
        }
    }

    /// Maps each of `values` onto itself.
    pub fn identity(values: impl IntoIterator<Item = i32>) -> Self {
        values
            .into_iter()
            .fold(Self::new(), |table, v| table.code(v, f64::from(v)))
    }

    pub fn code(mut self, raw: impl Into<RawValue>, value: f64) -> Self {
        self.codes.push(RecodeEntry {
            raw: raw.into(),
            value: Some(value),
        });
        self
    }

    pub fn missing(mut self, raw: impl Into<RawValue>) -> Self {
        self.codes.push(RecodeEntry {
            raw: raw.into(),
            value: None,
        });
        self
    }

    /// Declares every numeric code a second time in its text spelling.
    ///
    /// Integral codes get both spellings (`"3"` and `"3.0"`), since exports
    /// disagree on which one they write.
    pub fn also_as_text(mut self) -> Self {
        let mut extra = Vec::new();
        for entry in &self.codes {
            let RawValue::Number(v) = entry.raw else {
                continue;
            };
            let mut spellings = vec![format!("{v}")];
            if v.fract() == 0.0 {
                spellings.push(format!("{v:.1}"));
            }
            for spelling in spellings {
                let raw = RawValue::Text(spelling);
                if !self.codes.iter().any(|e| e.raw == raw) {
                    extra.push(RecodeEntry {
                        raw,
                        value: entry.value,
                    });
                }
            }
        }
        self.codes.extend(extra);
        self
    }

    /// Looks up one raw cell. `None` is a null cell.
    pub fn lookup(&self, raw: Option<&RawValue>) -> Recoded {
        let Some(raw) = raw else {
            return Recoded::Missing;
        };
        if raw.is_nan() {
            return Recoded::Missing;
        }
        if let RawValue::Text(text) = raw
            && self.missing_tokens.iter().any(|token| token == text)
        {
            return Recoded::Missing;
        }
        if let Some(entry) = self.codes.iter().find(|entry| entry.raw == *raw) {
            return entry.value.map_or(Recoded::Missing, Recoded::Value);
        }
        match raw {
            RawValue::Number(v) if self.passthrough => Recoded::Value(*v),
            _ => Recoded::Unmapped,
        }
    }

    /// Canonical values this table can produce from its declared codes.
    pub fn targets(&self) -> impl Iterator<Item = f64> + '_ {
        self.codes.iter().filter_map(|entry| entry.value)
    }
}

/// A recode table together with the items it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecodeGroup {
    #[serde(default)]
    pub items: ScaleItems,
    #[serde(flatten)]
    pub table: RecodeTable,
}
