//! Scoring pipeline stages: read, relabel, strip prefixes, score, write.
//!
//! Each stage is a plain function over a `DataFrame` so the binary and the
//! tests drive the same code.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};
use qscore_common::{prefixed_columns, strip_column_prefix};
use qscore_engine::{BatchOutcome, RelabelReport, apply_relabel, score_batch};
use qscore_model::{Instrument, InstrumentReport, ItemSource, RelabelSet, ScoringOptions};
use serde::Serialize;
use tracing::{debug, info, info_span};

/// Read a CSV export with a header row, inferring column types.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to read CSV: {}", path.display()))
}

pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(BufWriter::new(file))
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write CSV: {}", path.display()))
}

/// Applies each relabel set in order.
pub fn apply_relabels(
    df: &mut DataFrame,
    sets: &[RelabelSet],
) -> Result<Vec<(String, RelabelReport)>> {
    sets.iter()
        .map(|set| {
            let report = apply_relabel(df, set)
                .with_context(|| format!("apply relabel set {}", set.id))?;
            debug!(
                set = %set.id,
                cleared = report.cleared_cells,
                renamed = report.renamed_columns,
                "applied relabel set"
            );
            Ok((set.id.clone(), report))
        })
        .collect()
}

/// Removes each instrument's `<source_prefix>_` column qualifier.
pub fn strip_source_prefixes(df: &mut DataFrame, instruments: &[Instrument]) -> Result<usize> {
    let mut renamed = 0;
    for prefix in instruments.iter().filter_map(|i| i.source_prefix.as_deref()) {
        renamed += strip_column_prefix(df, prefix)
            .with_context(|| format!("strip column prefix {prefix}"))?;
    }
    Ok(renamed)
}

/// Instruments with at least one item column in `df`.
pub fn instruments_present(df: &DataFrame, instruments: &[Instrument]) -> Vec<Instrument> {
    instruments
        .iter()
        .filter(|instrument| match &instrument.items {
            ItemSource::Listed(items) => items
                .iter()
                .any(|item| df.get_column_index(item).is_some()),
            ItemSource::Prefixed { prefix, .. } => !prefixed_columns(df, prefix).is_empty(),
        })
        .cloned()
        .collect()
}

/// What to score and how.
#[derive(Debug, Clone, Default)]
pub struct ScoreRequest {
    pub instruments: Vec<Instrument>,
    pub relabel_sets: Vec<RelabelSet>,
    pub options: ScoringOptions,
    pub strip_prefixes: bool,
    /// Skip instruments none of whose items are in the table.
    pub only_present: bool,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub outcome: BatchOutcome,
    pub relabels: Vec<(String, RelabelReport)>,
    pub stripped_columns: usize,
    /// Instruments skipped because the table had none of their items.
    pub skipped: Vec<String>,
}

/// Relabels, strips prefixes and scores `df`.
pub fn run(mut df: DataFrame, request: &ScoreRequest) -> Result<PipelineOutput> {
    let span = info_span!("pipeline", rows = df.height());
    let _guard = span.enter();

    let relabels = apply_relabels(&mut df, &request.relabel_sets)?;
    let stripped_columns = if request.strip_prefixes {
        strip_source_prefixes(&mut df, &request.instruments)?
    } else {
        0
    };

    let (instruments, skipped) = if request.only_present {
        let present = instruments_present(&df, &request.instruments);
        let skipped = request
            .instruments
            .iter()
            .filter(|i| !present.iter().any(|p| p.id == i.id))
            .map(|i| i.id.clone())
            .collect();
        (present, skipped)
    } else {
        (request.instruments.clone(), Vec::new())
    };

    info!(
        instruments = instruments.len(),
        skipped = ?skipped,
        stripped_columns,
        "scoring table"
    );
    let outcome = score_batch(df, &instruments, &request.options);
    Ok(PipelineOutput {
        outcome,
        relabels,
        stripped_columns,
        skipped,
    })
}

/// Machine-readable summary of a scoring run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub rows: usize,
    pub columns: usize,
    pub options: &'a ScoringOptions,
    pub instruments: Vec<InstrumentEntry<'a>>,
    pub skipped: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct InstrumentEntry<'a> {
    pub instrument: &'a str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<&'a InstrumentReport>,
}

impl<'a> RunReport<'a> {
    pub fn new(
        input: &'a Path,
        output: &'a Path,
        options: &'a ScoringOptions,
        pipeline: &'a PipelineOutput,
    ) -> Self {
        let instruments = pipeline
            .outcome
            .outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(report) => InstrumentEntry {
                    instrument: &outcome.instrument,
                    status: "scored",
                    rule: None,
                    error: None,
                    report: Some(report),
                },
                Err(err) => InstrumentEntry {
                    instrument: &outcome.instrument,
                    status: "failed",
                    rule: Some(err.rule_id()),
                    error: Some(err.to_string()),
                    report: None,
                },
            })
            .collect();
        Self {
            input,
            output,
            rows: pipeline.outcome.data.height(),
            columns: pipeline.outcome.data.width(),
            options,
            instruments,
            skipped: &pipeline.skipped,
        }
    }
}

pub fn write_report_json(path: &Path, report: &RunReport<'_>) -> Result<PathBuf> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("write report {}", path.display()))?;
    Ok(path.to_path_buf())
}
