//! Questionnaire scoring engine.
//!
//! Takes an [`Instrument`](qscore_model::Instrument) and a Polars table of
//! item responses and produces the table augmented with subscale scores:
//!
//! 1. recode raw responses onto the canonical scale ([`recode`])
//! 2. reverse negatively worded items ([`reverse`])
//! 3. aggregate additive subscales or derive categorical ones ([`aggregate`], [`derive`])
//! 4. validate coverage, ranges and grouping exhaustiveness ([`validate`])
//!
//! Nothing is written to the table until every check for the instrument has
//! passed. [`batch::score_batch`] runs several instruments and isolates their
//! failures.

pub mod aggregate;
pub mod batch;
pub mod derive;
pub mod error;
pub mod executor;
mod frame;
pub mod recode;
pub mod relabel;
pub mod reverse;
pub mod validate;

pub use batch::{BatchOutcome, InstrumentOutcome, score_batch};
pub use error::{Result, ScoringError};
pub use executor::{Scored, score};
pub use recode::{ItemMatrix, Recoding};
pub use relabel::{RelabelReport, apply_relabel};
