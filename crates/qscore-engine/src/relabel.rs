//! Sentinel cleanup and column renaming for score-only sources.

use polars::prelude::DataFrame;
use qscore_common::format_numeric;
use qscore_model::{RawValue, RelabelSet};
use tracing::info;

use crate::error::Result;
use crate::frame::{has_column, raw_column, set_f64_column, set_label_column};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelabelReport {
    pub cleared_cells: usize,
    pub renamed_columns: usize,
}

/// Clears sentinels in, then renames, every column a rename in `set` matches.
///
/// Columns no rename matches are not touched. A rename whose target already
/// exists is skipped.
pub fn apply_relabel(df: &mut DataFrame, set: &RelabelSet) -> Result<RelabelReport> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();

    let mut report = RelabelReport::default();
    for name in &names {
        let Some(target) = set.rename_for(name) else {
            continue;
        };
        report.cleared_cells += clear_sentinels(df, name, set)?;
        if !target.is_empty() && target != *name && !has_column(df, &target) {
            df.rename(name, target.into())?;
            report.renamed_columns += 1;
        }
    }

    info!(
        set = %set.id,
        renamed = report.renamed_columns,
        cleared = report.cleared_cells,
        "relabelled columns"
    );
    Ok(report)
}

fn numeric_max(raw: &[Option<RawValue>]) -> Option<f64> {
    raw.iter()
        .filter_map(|value| match value {
            Some(RawValue::Number(n)) if !n.is_nan() => Some(*n),
            _ => None,
        })
        .reduce(f64::max)
}

/// Replaces sentinel cells in one column with nulls; returns how many were cleared.
fn clear_sentinels(df: &mut DataFrame, name: &str, set: &RelabelSet) -> Result<usize> {
    if set.sentinels.is_empty() {
        return Ok(0);
    }
    let raw = raw_column(df, name)?;
    if set.only_when_max_is_sentinel {
        match numeric_max(&raw) {
            Some(max) if set.is_sentinel(&RawValue::Number(max)) => {}
            _ => return Ok(0),
        }
    }

    let hits = raw
        .iter()
        .filter(|value| value.as_ref().is_some_and(|v| set.is_sentinel(v)))
        .count();
    if hits == 0 {
        return Ok(0);
    }

    let numeric = raw
        .iter()
        .flatten()
        .all(|value| matches!(value, RawValue::Number(_)));
    if numeric {
        let values: Vec<Option<f64>> = raw
            .iter()
            .map(|value| match value {
                Some(v @ RawValue::Number(n)) if !n.is_nan() && !set.is_sentinel(v) => Some(*n),
                _ => None,
            })
            .collect();
        set_f64_column(df, name, values)?;
    } else {
        let values: Vec<Option<String>> = raw
            .into_iter()
            .map(|value| match value {
                Some(v) if set.is_sentinel(&v) => None,
                Some(RawValue::Number(n)) => Some(format_numeric(n)),
                Some(RawValue::Text(s)) => Some(s),
                None => None,
            })
            .collect();
        set_label_column(df, name, values)?;
    }
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn frame() -> DataFrame {
        let columns: Vec<Column> = vec![
            Series::new("subject".into(), &["s1", "s2"]).into_column(),
            Series::new("wasi201_fsiq".into(), &[Some(101.0), Some(999.0)]).into_column(),
            Series::new("other".into(), &[999.0, 1.0]).into_column(),
        ];
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn clears_sentinels_and_strips_prefix() {
        let mut df = frame();
        let set = RelabelSet::new("wasi", "WASI-II")
            .with_rename("wasi201_", "")
            .with_sentinel(999.0);
        let report = apply_relabel(&mut df, &set).unwrap();
        assert_eq!(report, RelabelReport { cleared_cells: 1, renamed_columns: 1 });

        let fsiq = df.column("fsiq").unwrap();
        assert_eq!(fsiq.null_count(), 1);
        // untouched column keeps its sentinel
        assert_eq!(df.column("other").unwrap().null_count(), 0);
    }

    #[test]
    fn max_guard_skips_columns_without_sentinel_maximum() {
        let mut df = frame();
        let set = RelabelSet::new("penn_nih", "Tasks")
            .with_rename("wasi201_", "penntask_")
            .with_sentinel(500.0)
            .with_only_when_max_is_sentinel(true);
        let report = apply_relabel(&mut df, &set).unwrap();
        assert_eq!(report.cleared_cells, 0);
        assert!(has_column(&df, "penntask_fsiq"));
    }
}
