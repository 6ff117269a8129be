//! Per-instrument scoring reports.

use serde::{Deserialize, Serialize};

/// Unmapped responses seen in one column under lenient recoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmappedCount {
    pub column: String,
    pub count: usize,
    /// A few distinct offending values, for the log and the summary.
    pub examples: Vec<String>,
}

/// Observed values of one derived column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleReport {
    pub name: String,
    pub column: String,
    pub rule: String,
    pub n_items: usize,
    /// Rows whose score is missing.
    pub missing_scores: usize,
    pub observed_min: Option<f64>,
    pub observed_max: Option<f64>,
    pub theoretical_min: Option<f64>,
    pub theoretical_max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentReport {
    pub instrument: String,
    pub rows: usize,
    pub items: usize,
    pub scales: Vec<ScaleReport>,
    pub unmapped: Vec<UnmappedCount>,
    pub dropped_columns: Vec<String>,
    pub renamed_columns: usize,
}

impl InstrumentReport {
    pub fn new(instrument: impl Into<String>, rows: usize) -> Self {
        Self {
            instrument: instrument.into(),
            rows,
            ..Self::default()
        }
    }

    pub fn total_unmapped(&self) -> usize {
        self.unmapped.iter().map(|u| u.count).sum()
    }
}
