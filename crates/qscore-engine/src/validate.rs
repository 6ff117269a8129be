//! Range, coverage and exhaustiveness checks.
//!
//! Every check runs before any column is written; a failure aborts the
//! instrument and leaves the caller's table untouched.

use std::collections::{BTreeMap, BTreeSet};

use qscore_model::{
    DefinitionError, Instrument, ItemRange, ItemSource, ScaleItems, ScaleRole, ScoringRule,
    Subscale,
};

use crate::aggregate::Additive;
use crate::derive::GroupMatch;
use crate::error::{Result, ScoringError};

/// Checks that every item the definition names resolved to a column.
///
/// Listed sources are covered by [`Instrument::check`]; a prefixed source only
/// learns its items from the table, so a misspelt reverse, filler or subscale
/// item would otherwise score as permanently missing.
pub fn check_item_references(instrument: &Instrument, items: &[String]) -> Result<()> {
    let resolved: BTreeSet<&str> = items.iter().map(String::as_str).collect();
    let unknown = |context: String, item: &str| {
        Err(ScoringError::Definition(DefinitionError::UnknownItem {
            instrument: instrument.id.clone(),
            context,
            item: item.to_string(),
        }))
    };

    let lists = [
        ("reverse_items", &instrument.reverse_items),
        ("filler_items", &instrument.filler_items),
        ("retain_on_drop", &instrument.retain_on_drop),
    ];
    for (context, list) in lists {
        if let Some(item) = list.iter().find(|item| !resolved.contains(item.as_str())) {
            return unknown(context.to_string(), item);
        }
    }
    for (index, group) in instrument.recode.iter().enumerate() {
        if let ScaleItems::Listed(listed) = &group.items
            && let Some(item) = listed.iter().find(|item| !resolved.contains(item.as_str()))
        {
            return unknown(format!("recode group {}", index + 1), item);
        }
    }
    for scale in &instrument.subscales {
        if let ScaleItems::Listed(listed) = &scale.items
            && let Some(item) = listed.iter().find(|item| !resolved.contains(item.as_str()))
        {
            return unknown(format!("subscale '{}'", scale.name), item);
        }
    }
    Ok(())
}

/// Checks that declared subscale item counts reconcile with the item set.
///
/// Component subscales plus fillers must account for every item exactly once,
/// and each total subscale plus fillers must span the full set again.
/// Instruments with categorical rules are exempt.
pub fn check_coverage(instrument: &Instrument, items: &[String]) -> Result<()> {
    let violation = |declared: usize, expected: usize, detail: String| {
        Err(ScoringError::CoverageViolation {
            instrument: instrument.id.clone(),
            declared,
            expected,
            detail,
        })
    };

    if let ItemSource::Prefixed { prefix, expected } = &instrument.items
        && items.len() != *expected
    {
        return violation(
            items.len(),
            *expected,
            format!("columns starting with '{prefix}'"),
        );
    }
    if !instrument.is_additive() {
        return Ok(());
    }

    for scale in &instrument.subscales {
        if let ScaleItems::Listed(listed) = &scale.items
            && listed.len() != scale.n_items
        {
            return violation(
                listed.len(),
                scale.n_items,
                format!("subscale '{}' lists a different number of items", scale.name),
            );
        }
    }

    let fillers = instrument.filler_items.len();
    let components: Vec<&Subscale> = instrument
        .subscales
        .iter()
        .filter(|s| s.role == ScaleRole::Component)
        .collect();

    if !components.is_empty() {
        let declared: usize = components.iter().map(|s| s.n_items).sum::<usize>() + fillers;
        if declared != items.len() {
            return violation(
                declared,
                items.len(),
                "component subscales plus fillers".to_string(),
            );
        }

        let mut seen: BTreeSet<&str> = instrument.filler_items.iter().map(String::as_str).collect();
        for scale in &components {
            if let ScaleItems::Listed(listed) = &scale.items {
                for item in listed {
                    if !seen.insert(item.as_str()) {
                        return violation(
                            declared,
                            items.len(),
                            format!("item '{item}' is counted more than once"),
                        );
                    }
                }
            }
        }
    }

    for scale in instrument
        .subscales
        .iter()
        .filter(|s| s.role == ScaleRole::Total)
    {
        let declared = scale.n_items + fillers;
        if declared != items.len() {
            return violation(
                declared,
                items.len(),
                format!("total subscale '{}' plus fillers", scale.name),
            );
        }
    }
    Ok(())
}

/// Observed extremes of a derived column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Observed {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub missing: usize,
}

impl Observed {
    pub fn of(values: &[Option<f64>]) -> Self {
        let mut observed = Self::default();
        for value in values {
            match value {
                Some(v) => {
                    observed.min = Some(observed.min.map_or(*v, |m| m.min(*v)));
                    observed.max = Some(observed.max.map_or(*v, |m| m.max(*v)));
                }
                None => observed.missing += 1,
            }
        }
        observed
    }
}

/// Theoretical range of an additive subscale for rows with `n_items` items.
pub fn theoretical_range(scale: &Subscale, item_range: ItemRange, n_items: usize) -> ItemRange {
    match scale.rule {
        ScoringRule::Mean => item_range,
        _ => item_range.scaled(n_items),
    }
}

/// Checks best and worst possible completions against the theoretical range.
///
/// For each row, `score + nan_count * item_min` and
/// `score + nan_count * item_max` bound what the respondent could have scored.
/// Respondent-conditioned subscales are checked per role. Mean scores are
/// compared directly with the item range.
pub fn check_range(
    instrument: &Instrument,
    scale: &Subscale,
    result: &Additive,
    roles: Option<&[Option<String>]>,
) -> Result<()> {
    let item_range = instrument.item_range_for(scale);
    let conditioned = scale.is_respondent_conditioned();

    // role -> (n_items, lowest best case, highest worst case)
    let mut groups: BTreeMap<Option<&str>, (usize, f64, f64)> = BTreeMap::new();
    for (row, score) in result.score.iter().enumerate() {
        let Some(score) = *score else {
            continue;
        };
        let (best, worst) = match scale.rule {
            ScoringRule::Mean => (score, score),
            _ => {
                let nan = result.nan_count[row] as f64;
                (score + nan * item_range.min, score + nan * item_range.max)
            }
        };
        let role = if conditioned {
            roles.and_then(|roles| roles[row].as_deref())
        } else {
            None
        };
        let entry = groups
            .entry(role)
            .or_insert((result.items_count[row], best, worst));
        entry.1 = entry.1.min(best);
        entry.2 = entry.2.max(worst);
    }

    for (role, (n_items, actual_min, actual_max)) in groups {
        let theoretical = theoretical_range(scale, item_range, n_items);
        if actual_min < theoretical.min || actual_max > theoretical.max {
            return Err(ScoringError::RangeViolation {
                instrument: instrument.id.clone(),
                subscale: scale.name.clone(),
                group: role.map(ToString::to_string),
                theoretical_min: theoretical.min,
                theoretical_max: theoretical.max,
                actual_min,
                actual_max,
            });
        }
    }
    Ok(())
}

/// Checks a categorical column against its declared range.
pub fn check_bounds(
    instrument: &Instrument,
    scale: &Subscale,
    values: &[Option<f64>],
    range: ItemRange,
) -> Result<Observed> {
    let observed = Observed::of(values);
    if let (Some(min), Some(max)) = (observed.min, observed.max)
        && (min < range.min || max > range.max)
    {
        return Err(ScoringError::RangeViolation {
            instrument: instrument.id.clone(),
            subscale: scale.name.clone(),
            group: None,
            theoretical_min: range.min,
            theoretical_max: range.max,
            actual_min: min,
            actual_max: max,
        });
    }
    Ok(observed)
}

/// Checks that every row matched exactly one grouping label.
pub fn check_exhaustive(instrument: &Instrument, scale: &Subscale, matches: &[GroupMatch]) -> Result<()> {
    match matches.iter().position(|m| m.matched != 1) {
        Some(row) => Err(ScoringError::ExhaustivenessViolation {
            instrument: instrument.id.clone(),
            subscale: scale.name.clone(),
            row,
            matched: matches[row].matched,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::GroupLabel;
    use qscore_model::RecodeTable;

    fn bis_like() -> Instrument {
        Instrument::new(
            "demo",
            "Demo",
            ItemSource::numbered("demo", 5),
            ItemRange::new(1.0, 4.0),
        )
        .with_recode(ScaleItems::All, RecodeTable::identity(1..=4))
        .with_filler_items(vec!["demo5".to_string()])
        .with_subscale(Subscale::sum("a", ["demo1", "demo2"]))
        .with_subscale(Subscale::sum("b", ["demo3", "demo4"]))
    }

    fn items(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("demo{i}")).collect()
    }

    #[test]
    fn partition_with_fillers_is_covered() {
        assert!(check_coverage(&bis_like(), &items(5)).is_ok());
    }

    #[test]
    fn orphaned_item_is_a_coverage_violation() {
        let mut instrument = bis_like();
        instrument.items = ItemSource::numbered("demo", 6);
        let err = check_coverage(&instrument, &items(6)).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::CoverageViolation { declared: 5, expected: 6, .. }
        ));
    }

    #[test]
    fn duplicated_item_is_a_coverage_violation() {
        let mut instrument = bis_like();
        instrument.subscales[1] = Subscale::sum("b", ["demo2", "demo4"]);
        assert!(matches!(
            check_coverage(&instrument, &items(5)),
            Err(ScoringError::CoverageViolation { detail, .. }) if detail.contains("demo2")
        ));
    }

    #[test]
    fn total_must_span_all_items() {
        let instrument = bis_like().with_subscale(Subscale::total(3));
        assert!(matches!(
            check_coverage(&instrument, &items(5)),
            Err(ScoringError::CoverageViolation { declared: 4, expected: 5, .. })
        ));
    }

    #[test]
    fn best_case_below_minimum_is_a_range_violation() {
        let instrument = bis_like();
        let scale = &instrument.subscales[0];
        let result = Additive {
            present: vec![1],
            nan_count: vec![1],
            items_count: vec![2],
            score: vec![Some(0.0)],
        };
        let err = check_range(&instrument, scale, &result, None).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::RangeViolation { actual_min, theoretical_min, .. }
                if actual_min == 1.0 && theoretical_min == 2.0
        ));
    }

    #[test]
    fn partial_rows_within_range_pass() {
        let instrument = bis_like();
        let scale = &instrument.subscales[0];
        let result = Additive {
            present: vec![1, 2, 0],
            nan_count: vec![1, 0, 2],
            items_count: vec![2, 2, 2],
            score: vec![Some(4.0), Some(8.0), None],
        };
        assert!(check_range(&instrument, scale, &result, None).is_ok());
    }

    #[test]
    fn categorical_bounds_are_checked() {
        let instrument = bis_like();
        let scale = &instrument.subscales[0];
        let observed =
            check_bounds(&instrument, scale, &[Some(0.0), None, Some(1.0)], ItemRange::new(0.0, 1.0))
                .unwrap();
        assert_eq!(observed.missing, 1);
        assert!(check_bounds(&instrument, scale, &[Some(2.0)], ItemRange::new(0.0, 1.0)).is_err());
    }

    #[test]
    fn double_match_fails_exhaustiveness() {
        let instrument = bis_like();
        let scale = &instrument.subscales[0];
        let matches = vec![
            GroupMatch { label: GroupLabel::Both, matched: 1 },
            GroupMatch { label: GroupLabel::Both, matched: 2 },
        ];
        assert!(matches!(
            check_exhaustive(&instrument, scale, &matches),
            Err(ScoringError::ExhaustivenessViolation { row: 1, matched: 2, .. })
        ));
    }
}
