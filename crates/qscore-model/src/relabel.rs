//! Relabel sets for sources that only ship aggregated scores.
//!
//! These sources have no item-level data to score. A relabel set only clears
//! sentinel values and renames columns into the study's naming scheme.

use serde::{Deserialize, Serialize};

use crate::value::RawValue;

/// Replaces a leading `from` with `to` in a column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRename {
    pub from: String,
    pub to: String,
}

impl PrefixRename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The renamed column, if `column` starts with `from`.
    pub fn apply(&self, column: &str) -> Option<String> {
        column
            .strip_prefix(&self.from)
            .map(|rest| format!("{}{rest}", self.to))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelabelSet {
    pub id: String,
    pub name: String,
    /// Tried in order; the first matching rename wins.
    pub renames: Vec<PrefixRename>,
    /// Values cleared to missing in renamed columns.
    #[serde(default)]
    pub sentinels: Vec<RawValue>,
    /// Clear sentinels only in columns whose numeric maximum is a sentinel.
    #[serde(default)]
    pub only_when_max_is_sentinel: bool,
}

impl RelabelSet {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            renames: Vec::new(),
            sentinels: Vec::new(),
            only_when_max_is_sentinel: false,
        }
    }

    pub fn with_rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.renames.push(PrefixRename::new(from, to));
        self
    }

    pub fn with_sentinel(mut self, value: impl Into<RawValue>) -> Self {
        self.sentinels.push(value.into());
        self
    }

    pub fn with_only_when_max_is_sentinel(mut self, only: bool) -> Self {
        self.only_when_max_is_sentinel = only;
        self
    }

    /// New name for `column`, if any rename applies.
    pub fn rename_for(&self, column: &str) -> Option<String> {
        self.renames.iter().find_map(|rename| rename.apply(column))
    }

    pub fn is_sentinel(&self, value: &RawValue) -> bool {
        self.sentinels.iter().any(|s| s == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rename_wins() {
        let set = RelabelSet::new("tasks", "Tasks")
            .with_rename("dccs01_nih_dccs", "nihtoolbox_dimenscardsort")
            .with_rename("dccs01", "nihtoolbox_dimenscardsort");
        assert_eq!(
            set.rename_for("dccs01_nih_dccs_score").as_deref(),
            Some("nihtoolbox_dimenscardsort_score")
        );
        assert_eq!(
            set.rename_for("dccs01_raw").as_deref(),
            Some("nihtoolbox_dimenscardsort_raw")
        );
        assert_eq!(set.rename_for("subject"), None);
    }
}
