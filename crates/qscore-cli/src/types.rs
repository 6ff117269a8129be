use std::path::PathBuf;

use qscore_engine::RelabelReport;
use qscore_model::InstrumentReport;

#[derive(Debug)]
pub struct ScoreResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report_json: Option<PathBuf>,
    pub rows: usize,
    pub columns: usize,
    pub instruments: Vec<InstrumentSummary>,
    pub relabels: Vec<(String, RelabelReport)>,
    pub stripped_columns: usize,
    pub skipped: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct InstrumentSummary {
    pub id: String,
    pub name: String,
    pub report: Option<InstrumentReport>,
    pub failure: Option<Failure>,
}

#[derive(Debug)]
pub struct Failure {
    pub rule: &'static str,
    pub message: String,
    /// The data disagreed with the definition, as opposed to a missing column
    /// or an unreadable table.
    pub validation: bool,
}
