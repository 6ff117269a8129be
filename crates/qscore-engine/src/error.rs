//! Error types for scoring.

use qscore_model::DefinitionError;
use thiserror::Error;

/// Errors that abort scoring of one instrument.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScoringError {
    /// The definition itself is malformed.
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// Item columns required by the definition are absent from the table.
    #[error("{instrument}: missing columns: {}", .columns.join(", "))]
    MissingColumns {
        instrument: String,
        columns: Vec<String>,
    },

    /// Declared subscale item counts do not reconcile with the item set.
    #[error("{instrument}: item coverage mismatch: {detail} (declared {declared}, expected {expected})")]
    CoverageViolation {
        instrument: String,
        declared: usize,
        expected: usize,
        detail: String,
    },

    /// A subscale's best/worst completion escapes its theoretical range.
    #[error(
        "{instrument}: subscale '{subscale}'{} spans {actual_min}..{actual_max}, outside theoretical range {theoretical_min}..{theoretical_max}",
        .group.as_ref().map(|g| format!(" ({g})")).unwrap_or_default()
    )]
    RangeViolation {
        instrument: String,
        subscale: String,
        /// Respondent role when the range is checked per role.
        group: Option<String>,
        theoretical_min: f64,
        theoretical_max: f64,
        actual_min: f64,
        actual_max: f64,
    },

    /// A grouping classifier row matched zero or several labels.
    #[error("{instrument}: subscale '{subscale}' row {row} matched {matched} labels")]
    ExhaustivenessViolation {
        instrument: String,
        subscale: String,
        row: usize,
        matched: usize,
    },

    /// A response absent from the recode table under strict mode.
    #[error("{instrument}: column '{column}' row {row} holds unmapped value {value}")]
    UnmappedValue {
        instrument: String,
        column: String,
        row: usize,
        value: String,
    },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl ScoringError {
    /// Stable identifier for summaries and logs.
    pub fn rule_id(&self) -> &'static str {
        match self {
            Self::Definition(_) => "definition",
            Self::MissingColumns { .. } => "missing_columns",
            Self::CoverageViolation { .. } => "coverage",
            Self::RangeViolation { .. } => "range",
            Self::ExhaustivenessViolation { .. } => "exhaustiveness",
            Self::UnmappedValue { .. } => "unmapped",
            Self::Polars(_) => "dataframe",
        }
    }

    /// True for the data-validation failures that signal a defective definition
    /// or recode table rather than a table the engine could not read.
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            Self::CoverageViolation { .. }
                | Self::RangeViolation { .. }
                | Self::ExhaustivenessViolation { .. }
                | Self::UnmappedValue { .. }
        )
    }
}

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;
