//! CLI library components for questionnaire scoring.

pub mod logging;
pub mod pipeline;
