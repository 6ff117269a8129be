//! Data model for questionnaire scoring.
//!
//! An [`Instrument`] is an immutable, declarative description of one
//! questionnaire. The engine consumes it together with [`ScoringOptions`] and
//! returns an [`InstrumentReport`] alongside the augmented table.

pub mod error;
pub mod instrument;
pub mod options;
pub mod recode;
pub mod relabel;
pub mod report;
pub mod value;

pub use error::{DefinitionError, Result};
pub use instrument::{
    Instrument, ItemSource, LabeledSet, RespondentCount, ScaleItems, ScaleRole, ScoringRule,
    Subscale,
};
pub use options::{ItemCountPolicy, ItemLevelPolicy, ScoringOptions, UnmappedPolicy};
pub use recode::{RecodeGroup, RecodeTable, Recoded};
pub use relabel::{PrefixRename, RelabelSet};
pub use report::{InstrumentReport, ScaleReport, UnmappedCount};
pub use value::{ItemRange, RawValue};
