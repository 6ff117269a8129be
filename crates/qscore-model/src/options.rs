//! Configuration options for a scoring run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether source item columns survive scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemLevelPolicy {
    #[default]
    Drop,
    Keep,
}

/// Whether `*_items_count` columns are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCountPolicy {
    Yes,
    #[default]
    No,
}

/// Handling of responses that are neither coded nor a missing sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Treat as missing and report a warning count.
    #[default]
    Lenient,
    /// Abort the instrument on the first unmapped response.
    Strict,
}

impl FromStr for ItemLevelPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "keep" => Ok(Self::Keep),
            other => Err(format!("expected 'drop' or 'keep', got '{other}'")),
        }
    }
}

impl FromStr for ItemCountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            other => Err(format!("expected 'yes' or 'no', got '{other}'")),
        }
    }
}

impl fmt::Display for ItemLevelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Drop => "drop",
            Self::Keep => "keep",
        })
    }
}

impl fmt::Display for ItemCountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yes => "yes",
            Self::No => "no",
        })
    }
}

fn default_respondent_column() -> String {
    "respondent".to_string()
}

/// Options controlling one scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOptions {
    #[serde(default)]
    pub item_level: ItemLevelPolicy,
    #[serde(default)]
    pub item_count: ItemCountPolicy,
    #[serde(default)]
    pub unmapped: UnmappedPolicy,
    /// Column holding the respondent role for respondent-conditioned subscales.
    #[serde(default = "default_respondent_column")]
    pub respondent_column: String,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            item_level: ItemLevelPolicy::default(),
            item_count: ItemCountPolicy::default(),
            unmapped: UnmappedPolicy::default(),
            respondent_column: default_respondent_column(),
        }
    }
}

impl ScoringOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that abort on any unmapped response.
    pub fn strict() -> Self {
        Self {
            unmapped: UnmappedPolicy::Strict,
            ..Self::default()
        }
    }

    pub fn with_item_level(mut self, policy: ItemLevelPolicy) -> Self {
        self.item_level = policy;
        self
    }

    pub fn with_item_count(mut self, policy: ItemCountPolicy) -> Self {
        self.item_count = policy;
        self
    }

    pub fn with_unmapped(mut self, policy: UnmappedPolicy) -> Self {
        self.unmapped = policy;
        self
    }

    pub fn with_respondent_column(mut self, column: impl Into<String>) -> Self {
        self.respondent_column = column.into();
        self
    }

    pub fn keeps_items(&self) -> bool {
        self.item_level == ItemLevelPolicy::Keep
    }

    pub fn emits_item_count(&self) -> bool {
        self.item_count == ItemCountPolicy::Yes
    }
}
