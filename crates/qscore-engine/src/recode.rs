//! Value recoding of item columns.
//!
//! Every item covered by a recode group is read once and mapped onto the
//! instrument's canonical scale. Unmapped responses are either counted and
//! treated as missing, or abort the instrument under strict mode.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::DataFrame;
use qscore_model::{Instrument, RawValue, RecodeTable, Recoded, UnmappedCount};
use tracing::warn;

use crate::error::{Result, ScoringError};
use crate::frame::raw_column;

/// Distinct offending values kept per column for reporting.
const MAX_EXAMPLES: usize = 5;

/// Canonical item values, one vector per recoded column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemMatrix {
    rows: usize,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl ItemMatrix {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            columns: BTreeMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn insert(&mut self, item: impl Into<String>, values: Vec<Option<f64>>) {
        self.columns.insert(item.into(), values);
    }

    pub fn get(&self, item: &str) -> Option<&[Option<f64>]> {
        self.columns.get(item).map(Vec::as_slice)
    }

    pub(crate) fn get_mut(&mut self, item: &str) -> Option<&mut Vec<Option<f64>>> {
        self.columns.get_mut(item)
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Row-wise values of `items`; absent items read as all-missing.
    pub fn row(&self, row: usize, items: &[String]) -> Vec<Option<f64>> {
        items
            .iter()
            .map(|item| self.get(item).and_then(|values| values[row]))
            .collect()
    }
}

/// Recoded items plus the unmapped responses seen along the way.
#[derive(Debug, Clone, Default)]
pub struct Recoding {
    pub matrix: ItemMatrix,
    pub unmapped: Vec<UnmappedCount>,
}

/// Recodes one column of raw cells.
///
/// Returns the canonical values and the row indices of unmapped cells.
pub fn recode_values(
    table: &RecodeTable,
    raw: &[Option<RawValue>],
) -> (Vec<Option<f64>>, Vec<usize>) {
    let mut unmapped = Vec::new();
    let values = raw
        .iter()
        .enumerate()
        .map(|(row, cell)| match table.lookup(cell.as_ref()) {
            Recoded::Value(v) => Some(v),
            Recoded::Missing => None,
            Recoded::Unmapped => {
                unmapped.push(row);
                None
            }
        })
        .collect();
    (values, unmapped)
}

/// Recodes every item covered by a recode group.
///
/// `items` is the resolved item list. A group over all items covers fillers too.
pub fn recode_items(
    df: &DataFrame,
    instrument: &Instrument,
    items: &[String],
    strict: bool,
) -> Result<Recoding> {
    let mut recoding = Recoding {
        matrix: ItemMatrix::new(df.height()),
        unmapped: Vec::new(),
    };

    for group in &instrument.recode {
        for item in group.items.resolve(items, &[]) {
            let raw = raw_column(df, &item)?;
            let (values, unmapped_rows) = recode_values(&group.table, &raw);

            if let Some(&row) = unmapped_rows.first() {
                let value = raw[row]
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                if strict {
                    return Err(ScoringError::UnmappedValue {
                        instrument: instrument.id.clone(),
                        column: item,
                        row,
                        value,
                    });
                }

                let examples: BTreeSet<String> = unmapped_rows
                    .iter()
                    .filter_map(|&row| raw[row].as_ref().map(ToString::to_string))
                    .collect();
                let examples: Vec<String> = examples.into_iter().take(MAX_EXAMPLES).collect();
                warn!(
                    instrument = %instrument.id,
                    column = %item,
                    count = unmapped_rows.len(),
                    examples = %examples.join(", "),
                    "unmapped responses treated as missing"
                );
                recoding.unmapped.push(UnmappedCount {
                    column: item.clone(),
                    count: unmapped_rows.len(),
                    examples,
                });
            }

            recoding.matrix.insert(item, values);
        }
    }
    Ok(recoding)
}
