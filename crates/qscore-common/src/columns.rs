//! Column-name helpers for tables assembled from several source files.
//!
//! When a table is merged from several exports, each column is commonly
//! qualified with its file name (`bisbas01_bisbas3`). Scoring addresses items
//! by their bare names, so the qualifier is removed first.

use polars::prelude::*;

/// Names of all columns starting with `prefix`, in table order.
pub fn prefixed_columns(df: &DataFrame, prefix: &str) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .map(ToString::to_string)
        .collect()
}

/// Removes a `"{prefix}_"` qualifier from every column that starts with it.
///
/// Matching is exact and anchored at the start of the name. A column is left
/// alone when its stripped name is already taken, so a table never ends up with
/// duplicate columns. Returns the number of renamed columns.
pub fn strip_column_prefix(df: &mut DataFrame, prefix: &str) -> PolarsResult<usize> {
    let qualifier = format!("{prefix}_");
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();

    let mut renamed = 0;
    for name in &names {
        let Some(bare) = name.strip_prefix(&qualifier) else {
            continue;
        };
        if bare.is_empty() || names.iter().any(|existing| existing == bare) {
            continue;
        }
        df.rename(name, bare.into())?;
        renamed += 1;
    }
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(names: &[&str]) -> DataFrame {
        let columns: Vec<Column> = names
            .iter()
            .map(|name| Series::new((*name).into(), &[1i64, 2]).into_column())
            .collect();
        DataFrame::new(columns).unwrap()
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn strips_only_anchored_prefix() {
        let mut df = frame(&["subject", "rbqa01_rbqa1", "rbqa01_rbqa2", "x_rbqa01_rbqa3"]);
        let renamed = strip_column_prefix(&mut df, "rbqa01").unwrap();
        assert_eq!(renamed, 2);
        assert_eq!(names(&df), vec!["subject", "rbqa1", "rbqa2", "x_rbqa01_rbqa3"]);
    }

    #[test]
    fn keeps_column_when_bare_name_exists() {
        let mut df = frame(&["rbqa1", "rbqa01_rbqa1"]);
        let renamed = strip_column_prefix(&mut df, "rbqa01").unwrap();
        assert_eq!(renamed, 0);
        assert_eq!(names(&df), vec!["rbqa1", "rbqa01_rbqa1"]);
    }

    #[test]
    fn lists_prefixed_columns_in_order() {
        let df = frame(&["hu01", "subject", "hu02", "hu10"]);
        assert_eq!(prefixed_columns(&df, "hu0"), vec!["hu01", "hu02"]);
    }
}
