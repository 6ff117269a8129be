//! Declarative instrument definitions.
//!
//! An instrument is a constant value. The engine reads it but never mutates it,
//! and per-run results are returned separately.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{DefinitionError, Result};
use crate::recode::{RecodeGroup, RecodeTable};
use crate::value::ItemRange;

/// Where an instrument's item columns come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    /// Explicit item names in questionnaire order.
    Listed(Vec<String>),
    /// Every column whose name starts with `prefix`, in table order.
    Prefixed { prefix: String, expected: usize },
}

impl ItemSource {
    /// `{stem}1`, `{stem}2`, ... `{stem}{count}`.
    pub fn numbered(stem: &str, count: usize) -> Self {
        Self::Listed((1..=count).map(|i| format!("{stem}{i}")).collect())
    }

    pub fn listed<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Listed(items.into_iter().map(Into::into).collect())
    }

    /// Number of items the instrument declares.
    pub fn expected_len(&self) -> usize {
        match self {
            Self::Listed(items) => items.len(),
            Self::Prefixed { expected, .. } => *expected,
        }
    }

    /// Names known without looking at a table.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Self::Listed(items) => Some(items),
            Self::Prefixed { .. } => None,
        }
    }
}

/// Which items feed a subscale or a recode group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleItems {
    #[default]
    All,
    Listed(Vec<String>),
}

impl ScaleItems {
    pub fn listed<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Listed(items.into_iter().map(Into::into).collect())
    }

    /// Resolves against the instrument's item columns; `All` skips `exclude`.
    pub fn resolve(&self, items: &[String], exclude: &[String]) -> Vec<String> {
        match self {
            Self::All => items
                .iter()
                .filter(|item| !exclude.contains(*item))
                .cloned()
                .collect(),
            Self::Listed(listed) => listed.clone(),
        }
    }
}

/// Component subscales partition the items; totals span them again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleRole {
    #[default]
    Component,
    Total,
}

/// A label and the binary items that vote for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSet {
    pub label: String,
    pub items: Vec<String>,
}

impl LabeledSet {
    pub fn new<I, S>(label: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// How a subscale's items become one value per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringRule {
    #[default]
    Sum,
    Mean,
    /// 1-based position of the most severe endorsed item; items run least to most severe.
    SeverityIndex,
    AnyEndorsed,
    /// A single item standing in for the subscale.
    PassThrough { range: ItemRange },
    /// Labels rows by which of two binary item sets has an endorsement.
    Grouping {
        first: LabeledSet,
        second: LabeledSet,
        both: String,
        neither: String,
    },
}

impl ScoringRule {
    /// Sum and mean rules produce the nan-count/item-count/score triple.
    pub fn is_additive(&self) -> bool {
        matches!(self, Self::Sum | Self::Mean)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::SeverityIndex => "severity_index",
            Self::AnyEndorsed => "any_endorsed",
            Self::PassThrough { .. } => "pass_through",
            Self::Grouping { .. } => "grouping",
        }
    }
}

/// Item count that applies to rows from one respondent role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentCount {
    pub role: String,
    pub n_items: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscale {
    pub name: String,
    #[serde(default)]
    pub items: ScaleItems,
    /// Declared item count, used for coverage and as the nan-count baseline.
    pub n_items: usize,
    #[serde(default)]
    pub role: ScaleRole,
    #[serde(default)]
    pub rule: ScoringRule,
    /// Overrides the instrument's item range for this subscale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_range: Option<ItemRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub respondent_counts: Vec<RespondentCount>,
}

impl Subscale {
    /// A summed component subscale over `items`.
    pub fn sum<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        Self {
            name: name.into(),
            n_items: items.len(),
            items: ScaleItems::Listed(items),
            role: ScaleRole::Component,
            rule: ScoringRule::Sum,
            item_range: None,
            respondent_counts: Vec::new(),
        }
    }

    /// A summed `tot` subscale over every non-filler item.
    pub fn total(n_items: usize) -> Self {
        Self {
            name: "tot".to_string(),
            items: ScaleItems::All,
            n_items,
            role: ScaleRole::Total,
            rule: ScoringRule::Sum,
            item_range: None,
            respondent_counts: Vec::new(),
        }
    }

    /// A categorical subscale derived from `items` by `rule`.
    pub fn derived<I, S>(name: impl Into<String>, rule: ScoringRule, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scale = Self::sum(name, items);
        scale.rule = rule;
        scale
    }

    /// A grouping classifier over the union of both labelled sets.
    pub fn grouping(
        name: impl Into<String>,
        first: LabeledSet,
        second: LabeledSet,
        both: impl Into<String>,
        neither: impl Into<String>,
    ) -> Self {
        let items: Vec<String> = first.items.iter().chain(&second.items).cloned().collect();
        Self::derived(
            name,
            ScoringRule::Grouping {
                first,
                second,
                both: both.into(),
                neither: neither.into(),
            },
            items,
        )
    }

    pub fn with_rule(mut self, rule: ScoringRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_item_range(mut self, range: ItemRange) -> Self {
        self.item_range = Some(range);
        self
    }

    pub fn with_respondent_count(mut self, role: impl Into<String>, n_items: usize) -> Self {
        self.respondent_counts.push(RespondentCount {
            role: role.into(),
            n_items,
        });
        self
    }

    /// Item count for a row answered by `role`; unknown roles use the declared count.
    pub fn n_items_for(&self, role: Option<&str>) -> usize {
        role.and_then(|role| self.respondent_counts.iter().find(|c| c.role == role))
            .map_or(self.n_items, |c| c.n_items)
    }

    pub fn is_respondent_conditioned(&self) -> bool {
        !self.respondent_counts.is_empty()
    }
}

/// Immutable description of one questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Output column prefix, e.g. `bisbas` in `bisbas_bis_nan_count`.
    pub id: String,
    pub name: String,
    /// File qualifier a caller strips from column names before scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_prefix: Option<String>,
    pub items: ItemSource,
    pub item_range: ItemRange,
    #[serde(default)]
    pub recode: Vec<RecodeGroup>,
    #[serde(default)]
    pub reverse_items: Vec<String>,
    #[serde(default)]
    pub filler_items: Vec<String>,
    #[serde(default)]
    pub subscales: Vec<Subscale>,
    /// Previously published score columns, always dropped.
    #[serde(default)]
    pub superseded_columns: Vec<String>,
    /// Non-item bookkeeping columns dropped with the items when present.
    #[serde(default)]
    pub extra_drop_columns: Vec<String>,
    /// Kept item columns are renamed `{label_prefix}_{item}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_prefix: Option<String>,
    /// Items kept even when item-level columns are dropped.
    #[serde(default)]
    pub retain_on_drop: Vec<String>,
    #[serde(default)]
    pub strict_recode: bool,
}

impl Instrument {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        items: ItemSource,
        item_range: ItemRange,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source_prefix: None,
            items,
            item_range,
            recode: Vec::new(),
            reverse_items: Vec::new(),
            filler_items: Vec::new(),
            subscales: Vec::new(),
            superseded_columns: Vec::new(),
            extra_drop_columns: Vec::new(),
            label_prefix: None,
            retain_on_drop: Vec::new(),
            strict_recode: false,
        }
    }

    pub fn with_source_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.source_prefix = Some(prefix.into());
        self
    }

    pub fn with_recode(mut self, items: ScaleItems, table: RecodeTable) -> Self {
        self.recode.push(RecodeGroup { items, table });
        self
    }

    pub fn with_reverse_items(mut self, items: Vec<String>) -> Self {
        self.reverse_items = items;
        self
    }

    pub fn with_filler_items(mut self, items: Vec<String>) -> Self {
        self.filler_items = items;
        self
    }

    pub fn with_subscale(mut self, subscale: Subscale) -> Self {
        self.subscales.push(subscale);
        self
    }

    pub fn with_superseded_columns(mut self, columns: Vec<String>) -> Self {
        self.superseded_columns = columns;
        self
    }

    pub fn with_extra_drop_columns(mut self, columns: Vec<String>) -> Self {
        self.extra_drop_columns = columns;
        self
    }

    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = Some(prefix.into());
        self
    }

    pub fn with_retain_on_drop(mut self, items: Vec<String>) -> Self {
        self.retain_on_drop = items;
        self
    }

    pub fn with_strict_recode(mut self, strict: bool) -> Self {
        self.strict_recode = strict;
        self
    }

    /// Picks items by 1-based questionnaire number from a listed item source.
    ///
    /// Numbers beyond the item list are skipped; [`Instrument::check`] reports
    /// the resulting short subscale.
    pub fn items_by_number(&self, numbers: &[usize]) -> Vec<String> {
        let Some(items) = self.items.names() else {
            return Vec::new();
        };
        numbers
            .iter()
            .filter_map(|n| n.checked_sub(1).and_then(|i| items.get(i)))
            .cloned()
            .collect()
    }

    /// Additive instruments must partition their items across subscales.
    pub fn is_additive(&self) -> bool {
        !self.subscales.is_empty() && self.subscales.iter().all(|s| s.rule.is_additive())
    }

    pub fn item_range_for(&self, subscale: &Subscale) -> ItemRange {
        subscale.item_range.unwrap_or(self.item_range)
    }

    /// Name of the score column for a subscale.
    pub fn score_column(&self, subscale: &Subscale) -> String {
        format!("{}_{}", self.id, subscale.name)
    }

    pub fn nan_count_column(&self, subscale: &Subscale) -> String {
        format!("{}_{}_nan_count", self.id, subscale.name)
    }

    pub fn items_count_column(&self, subscale: &Subscale) -> String {
        format!("{}_{}_items_count", self.id, subscale.name)
    }

    /// Every column this instrument can append.
    pub fn output_columns(&self) -> Vec<String> {
        let mut columns = Vec::new();
        for scale in &self.subscales {
            if scale.rule.is_additive() {
                columns.push(self.nan_count_column(scale));
                columns.push(self.items_count_column(scale));
            }
            columns.push(self.score_column(scale));
        }
        columns
    }

    /// Checks the definition for structural defects.
    ///
    /// Item-count coverage depends on the resolved item set and is checked by
    /// the engine at scoring time.
    pub fn check(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(DefinitionError::EmptyId);
        }
        if !self.item_range.is_valid() {
            return Err(DefinitionError::InvalidRange {
                instrument: self.id.clone(),
                min: self.item_range.min,
                max: self.item_range.max,
            });
        }

        let known = self.check_item_names()?;
        let recoded = self.check_recode_groups(known.as_ref())?;
        self.check_subscales(known.as_ref(), recoded.as_ref())
    }

    fn unknown(&self, context: impl Into<String>, item: &str) -> DefinitionError {
        DefinitionError::UnknownItem {
            instrument: self.id.clone(),
            context: context.into(),
            item: item.to_string(),
        }
    }

    fn check_item_names(&self) -> Result<Option<BTreeSet<&str>>> {
        let Some(items) = self.items.names() else {
            return Ok(None);
        };
        let mut seen = BTreeSet::new();
        for item in items {
            if !seen.insert(item.as_str()) {
                return Err(DefinitionError::DuplicateItem {
                    instrument: self.id.clone(),
                    item: item.clone(),
                });
            }
        }
        let lists = [
            ("reverse_items", &self.reverse_items),
            ("filler_items", &self.filler_items),
            ("retain_on_drop", &self.retain_on_drop),
        ];
        for (context, list) in lists {
            if let Some(item) = list.iter().find(|item| !seen.contains(item.as_str())) {
                return Err(self.unknown(context, item));
            }
        }
        Ok(Some(seen))
    }

    /// Returns which items are recoded; `None` means every item is.
    fn check_recode_groups(
        &self,
        known: Option<&BTreeSet<&str>>,
    ) -> Result<Option<BTreeSet<String>>> {
        let mut claimed: BTreeMap<String, usize> = BTreeMap::new();
        let mut covers_all = false;
        for (index, group) in self.recode.iter().enumerate() {
            for value in group.table.targets() {
                if !self.item_range.contains(value) {
                    return Err(DefinitionError::RecodeOutOfRange {
                        instrument: self.id.clone(),
                        value,
                        min: self.item_range.min,
                        max: self.item_range.max,
                    });
                }
            }
            let ScaleItems::Listed(items) = &group.items else {
                if covers_all || !claimed.is_empty() {
                    return Err(DefinitionError::OverlappingRecode {
                        instrument: self.id.clone(),
                        item: "*".to_string(),
                    });
                }
                covers_all = true;
                continue;
            };
            for item in items {
                if let Some(known) = known
                    && !known.contains(item.as_str())
                {
                    return Err(self.unknown(format!("recode group {}", index + 1), item));
                }
                if covers_all || claimed.insert(item.clone(), index).is_some() {
                    return Err(DefinitionError::OverlappingRecode {
                        instrument: self.id.clone(),
                        item: item.clone(),
                    });
                }
            }
        }
        Ok((!covers_all).then(|| claimed.into_keys().collect()))
    }

    fn check_subscales(
        &self,
        known: Option<&BTreeSet<&str>>,
        recoded: Option<&BTreeSet<String>>,
    ) -> Result<()> {
        let mut names = BTreeSet::new();
        for scale in &self.subscales {
            if !names.insert(scale.name.as_str()) {
                return Err(DefinitionError::DuplicateSubscale {
                    instrument: self.id.clone(),
                    subscale: scale.name.clone(),
                });
            }
            let invalid = |reason: &str| DefinitionError::InvalidSubscale {
                instrument: self.id.clone(),
                subscale: scale.name.clone(),
                reason: reason.to_string(),
            };
            if scale.n_items == 0 {
                return Err(DefinitionError::EmptySubscale {
                    instrument: self.id.clone(),
                    subscale: scale.name.clone(),
                });
            }
            if let Some(range) = scale.item_range
                && !range.is_valid()
            {
                return Err(invalid("item range is inverted or not finite"));
            }
            if scale.respondent_counts.iter().any(|c| c.n_items > scale.n_items) {
                return Err(invalid("a respondent item count exceeds the declared count"));
            }

            if let ScaleItems::Listed(items) = &scale.items {
                if items.is_empty() {
                    return Err(DefinitionError::EmptySubscale {
                        instrument: self.id.clone(),
                        subscale: scale.name.clone(),
                    });
                }
                for item in items {
                    if let Some(known) = known
                        && !known.contains(item.as_str())
                    {
                        return Err(self.unknown(format!("subscale '{}'", scale.name), item));
                    }
                    if let Some(recoded) = recoded
                        && !recoded.contains(item)
                    {
                        return Err(DefinitionError::UnrecodedItem {
                            instrument: self.id.clone(),
                            subscale: scale.name.clone(),
                            item: item.clone(),
                        });
                    }
                }
            } else if let Some(recoded) = recoded
                && let Some(items) = self.items.names()
                && let Some(item) = items
                    .iter()
                    .find(|item| !recoded.contains(*item) && !self.filler_items.contains(*item))
            {
                return Err(DefinitionError::UnrecodedItem {
                    instrument: self.id.clone(),
                    subscale: scale.name.clone(),
                    item: item.clone(),
                });
            }

            if let Some(range) = scale.item_range
                && range != self.item_range
                && self.reverse_items.iter().any(|item| match &scale.items {
                    ScaleItems::Listed(items) => items.contains(item),
                    ScaleItems::All => !self.filler_items.contains(item),
                })
            {
                return Err(invalid(
                    "reverse-scored items flip across the instrument range, not an overridden one",
                ));
            }

            match &scale.rule {
                ScoringRule::PassThrough { range } => {
                    if !matches!(&scale.items, ScaleItems::Listed(items) if items.len() == 1) {
                        return Err(invalid("pass-through needs exactly one item"));
                    }
                    if !range.is_valid() {
                        return Err(invalid("pass-through range is inverted or not finite"));
                    }
                }
                ScoringRule::Grouping { first, second, .. } => {
                    if first.items.is_empty() || second.items.is_empty() {
                        return Err(invalid("both grouping sets need items"));
                    }
                    let union: Vec<&String> = first.items.iter().chain(&second.items).collect();
                    let listed = match &scale.items {
                        ScaleItems::Listed(items) => items.iter().collect::<Vec<_>>(),
                        ScaleItems::All => Vec::new(),
                    };
                    if union != listed {
                        return Err(invalid("items must be the union of both grouping sets"));
                    }
                }
                ScoringRule::SeverityIndex | ScoringRule::AnyEndorsed => {
                    if !matches!(scale.items, ScaleItems::Listed(_)) {
                        return Err(invalid("categorical rules need an explicit item list"));
                    }
                }
                ScoringRule::Sum | ScoringRule::Mean => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Instrument {
        Instrument::new(
            "demo",
            "Demo scale",
            ItemSource::numbered("demo", 4),
            ItemRange::new(0.0, 3.0),
        )
        .with_recode(ScaleItems::All, RecodeTable::identity(0..=3))
        .with_subscale(Subscale::sum("a", ["demo1", "demo2"]))
        .with_subscale(Subscale::sum("b", ["demo3", "demo4"]))
        .with_subscale(Subscale::total(4))
    }

    #[test]
    fn well_formed_definition_passes() {
        assert_eq!(small().check(), Ok(()));
        assert!(small().is_additive());
    }

    #[test]
    fn items_by_number_is_one_based() {
        let instrument = small();
        assert_eq!(instrument.items_by_number(&[1, 4]), vec!["demo1", "demo4"]);
        assert!(instrument.items_by_number(&[0, 9]).is_empty());
    }

    #[test]
    fn unknown_subscale_item_is_rejected() {
        let instrument = small().with_subscale(Subscale::sum("c", ["demo9"]));
        assert!(matches!(
            instrument.check(),
            Err(DefinitionError::UnknownItem { item, .. }) if item == "demo9"
        ));
    }

    #[test]
    fn recode_target_outside_range_is_rejected() {
        let mut instrument = small();
        instrument.recode = vec![RecodeGroup {
            items: ScaleItems::All,
            table: RecodeTable::new().code(1, 4.0),
        }];
        assert!(matches!(
            instrument.check(),
            Err(DefinitionError::RecodeOutOfRange { value, .. }) if value == 4.0
        ));
    }

    #[test]
    fn overlapping_recode_groups_are_rejected() {
        let instrument = Instrument::new(
            "demo",
            "Demo",
            ItemSource::numbered("demo", 2),
            ItemRange::new(0.0, 1.0),
        )
        .with_recode(ScaleItems::listed(["demo1"]), RecodeTable::identity(0..=1))
        .with_recode(ScaleItems::listed(["demo1", "demo2"]), RecodeTable::identity(0..=1));
        assert!(matches!(
            instrument.check(),
            Err(DefinitionError::OverlappingRecode { item, .. }) if item == "demo1"
        ));
    }

    #[test]
    fn scored_item_without_recode_is_rejected() {
        let instrument = Instrument::new(
            "demo",
            "Demo",
            ItemSource::numbered("demo", 2),
            ItemRange::new(0.0, 1.0),
        )
        .with_recode(ScaleItems::listed(["demo1"]), RecodeTable::identity(0..=1))
        .with_subscale(Subscale::sum("a", ["demo1", "demo2"]));
        assert!(matches!(
            instrument.check(),
            Err(DefinitionError::UnrecodedItem { item, .. }) if item == "demo2"
        ));
    }

    #[test]
    fn pass_through_requires_single_item() {
        let instrument = small().with_subscale(Subscale::derived(
            "c",
            ScoringRule::PassThrough {
                range: ItemRange::new(0.0, 3.0),
            },
            ["demo1", "demo2"],
        ));
        assert!(matches!(
            instrument.check(),
            Err(DefinitionError::InvalidSubscale { subscale, .. }) if subscale == "c"
        ));
    }

    #[test]
    fn respondent_count_selects_per_role() {
        let scale = Subscale::total(34).with_respondent_count("Child", 33);
        assert_eq!(scale.n_items_for(Some("Child")), 33);
        assert_eq!(scale.n_items_for(Some("Parent")), 34);
        assert_eq!(scale.n_items_for(None), 34);
    }

    #[test]
    fn output_columns_follow_naming_convention() {
        let columns = small().output_columns();
        assert_eq!(
            &columns[..3],
            &["demo_a_nan_count", "demo_a_items_count", "demo_a"]
        );
    }
}
