use thiserror::Error;

/// Structural defects in an instrument definition.
///
/// These are detected before any row is read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("instrument id must not be empty")]
    EmptyId,

    #[error("{instrument}: invalid item range {min}..{max}")]
    InvalidRange {
        instrument: String,
        min: f64,
        max: f64,
    },

    #[error("{instrument}: item '{item}' is listed more than once")]
    DuplicateItem { instrument: String, item: String },

    #[error("{instrument}: {context} references unknown item '{item}'")]
    UnknownItem {
        instrument: String,
        context: String,
        item: String,
    },

    #[error("{instrument}: subscale '{subscale}' is defined more than once")]
    DuplicateSubscale {
        instrument: String,
        subscale: String,
    },

    #[error("{instrument}: subscale '{subscale}' has no items")]
    EmptySubscale {
        instrument: String,
        subscale: String,
    },

    #[error("{instrument}: subscale '{subscale}' is invalid: {reason}")]
    InvalidSubscale {
        instrument: String,
        subscale: String,
        reason: String,
    },

    #[error("{instrument}: item '{item}' is claimed by more than one recode group")]
    OverlappingRecode { instrument: String, item: String },

    #[error("{instrument}: item '{item}' is scored by '{subscale}' but has no recode group")]
    UnrecodedItem {
        instrument: String,
        subscale: String,
        item: String,
    },

    #[error("{instrument}: recode target {value} lies outside the item range {min}..{max}")]
    RecodeOutOfRange {
        instrument: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type Result<T> = std::result::Result<T, DefinitionError>;
