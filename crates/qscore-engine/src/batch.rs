//! Scoring several instruments over one table.
//!
//! Instruments own disjoint columns, so they run one after another against the
//! same table. A failing instrument is recorded and skipped; the table keeps
//! the columns the earlier instruments added.

use polars::prelude::DataFrame;
use qscore_model::{Instrument, InstrumentReport, ScoringOptions};
use tracing::error;

use crate::error::ScoringError;
use crate::executor::score;

/// Result of one instrument within a batch.
#[derive(Debug)]
pub struct InstrumentOutcome {
    pub instrument: String,
    pub result: Result<InstrumentReport, ScoringError>,
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub data: DataFrame,
    pub outcomes: Vec<InstrumentOutcome>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn reports(&self) -> impl Iterator<Item = &InstrumentReport> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ScoringError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.instrument.as_str(), e)))
    }
}

/// Scores `instruments` in order over `df`.
pub fn score_batch(
    df: DataFrame,
    instruments: &[Instrument],
    options: &ScoringOptions,
) -> BatchOutcome {
    let mut data = df;
    let mut outcomes = Vec::with_capacity(instruments.len());

    for instrument in instruments {
        let result = match score(&data, instrument, options) {
            Ok(scored) => {
                data = scored.data;
                Ok(scored.report)
            }
            Err(err) => {
                error!(
                    instrument = %instrument.id,
                    rule = err.rule_id(),
                    error = %err,
                    "instrument failed; its columns were left unchanged"
                );
                Err(err)
            }
        };
        outcomes.push(InstrumentOutcome {
            instrument: instrument.id.clone(),
            result,
        });
    }

    BatchOutcome { data, outcomes }
}
