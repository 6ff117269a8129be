//! Shared utilities for the questionnaire scoring crates.
//!
//! Polars `AnyValue` conversions used when reading response tables, and the
//! column-prefix cleanup a caller performs before handing a table to the engine.

pub mod columns;
pub mod polars;

pub use columns::{prefixed_columns, strip_column_prefix};
pub use polars::{any_to_string, format_numeric};
