//! Column access helpers over Polars tables.

use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};
use qscore_common::any_to_string;
use qscore_model::RawValue;

use crate::error::Result;

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Reads a cell without any cross-type coercion: text stays text.
pub(crate) fn raw_value(value: AnyValue<'_>) -> Option<RawValue> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(RawValue::Number(f64::from(v))),
        AnyValue::Int16(v) => Some(RawValue::Number(f64::from(v))),
        AnyValue::Int32(v) => Some(RawValue::Number(f64::from(v))),
        AnyValue::Int64(v) => Some(RawValue::Number(v as f64)),
        AnyValue::UInt8(v) => Some(RawValue::Number(f64::from(v))),
        AnyValue::UInt16(v) => Some(RawValue::Number(f64::from(v))),
        AnyValue::UInt32(v) => Some(RawValue::Number(f64::from(v))),
        AnyValue::UInt64(v) => Some(RawValue::Number(v as f64)),
        AnyValue::Float32(v) => Some(RawValue::Number(f64::from(v))),
        AnyValue::Float64(v) => Some(RawValue::Number(v)),
        AnyValue::Boolean(b) => Some(RawValue::Number(if b { 1.0 } else { 0.0 })),
        AnyValue::String(s) => Some(RawValue::Text(s.to_string())),
        AnyValue::StringOwned(s) => Some(RawValue::Text(s.to_string())),
        other => Some(RawValue::Text(other.to_string())),
    }
}

pub(crate) fn raw_column(df: &DataFrame, name: &str) -> Result<Vec<Option<RawValue>>> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(raw_value(series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Trimmed text values; empty cells read as `None`.
pub(crate) fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = any_to_string(series.get(idx).unwrap_or(AnyValue::Null));
        let trimmed = value.trim();
        values.push((!trimmed.is_empty()).then(|| trimmed.to_string()));
    }
    Ok(values)
}

pub(crate) fn set_f64_column(df: &mut DataFrame, name: &str, values: Vec<Option<f64>>) -> Result<()> {
    let series = Series::new(name.into(), values);
    df.with_column(series)?;
    Ok(())
}

pub(crate) fn set_count_column(df: &mut DataFrame, name: &str, values: &[usize]) -> Result<()> {
    let counts: Vec<i64> = values.iter().map(|&v| v as i64).collect();
    let series = Series::new(name.into(), counts);
    df.with_column(series)?;
    Ok(())
}

pub(crate) fn set_label_column(
    df: &mut DataFrame,
    name: &str,
    values: Vec<Option<String>>,
) -> Result<()> {
    let series = Series::new(name.into(), values);
    df.with_column(series)?;
    Ok(())
}

/// Drops the listed columns that exist and returns their names.
pub(crate) fn drop_existing(df: &mut DataFrame, names: &[String]) -> Result<Vec<String>> {
    let mut dropped = Vec::new();
    for name in names {
        if has_column(df, name) {
            df.drop_in_place(name)?;
            dropped.push(name.clone());
        }
    }
    Ok(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn};

    #[test]
    fn raw_value_keeps_text_as_text() {
        assert_eq!(raw_value(AnyValue::String("1")), Some(RawValue::Text("1".to_string())));
        assert_eq!(raw_value(AnyValue::Int64(1)), Some(RawValue::Number(1.0)));
        assert_eq!(raw_value(AnyValue::Null), None);
    }

    #[test]
    fn string_column_trims_and_blanks_empty() {
        let df = DataFrame::new(vec![
            Series::new("respondent".into(), &[" Child ", ""]).into_column(),
        ])
        .unwrap();
        assert_eq!(
            string_column(&df, "respondent").unwrap(),
            vec![Some("Child".to_string()), None]
        );
    }

    #[test]
    fn drop_existing_skips_absent_columns() {
        let columns: Vec<Column> = vec![
            Series::new("a".into(), &[1i64]).into_column(),
            Series::new("b".into(), &[2i64]).into_column(),
        ];
        let mut df = DataFrame::new(columns).unwrap();
        let dropped = drop_existing(&mut df, &["b".to_string(), "z".to_string()]).unwrap();
        assert_eq!(dropped, vec!["b".to_string()]);
        assert_eq!(df.width(), 1);
    }
}
