//! Built-in questionnaire definitions.
//!
//! Every instrument here is pure data. Scoring lives in `qscore-engine`; this
//! crate only describes what to score. Extra definitions can be loaded from
//! TOML with [`load_definitions`] and merged into a [`Catalog`].

pub mod catalog;
pub mod error;
pub mod instruments;
pub mod loader;
pub mod relabel;

use std::sync::LazyLock;

use qscore_model::Instrument;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use loader::{Definitions, load_definitions, parse_definitions};
pub use relabel::{get_relabel_set, relabel_sets};

static BUILTIN: LazyLock<Vec<Instrument>> = LazyLock::new(instruments::builtin);

/// Return all built-in instruments in catalogue order.
pub fn all_instruments() -> &'static [Instrument] {
    &BUILTIN
}

/// Look up a built-in instrument by id.
pub fn get_instrument(id: &str) -> Option<&'static Instrument> {
    BUILTIN.iter().find(|instrument| instrument.id == id)
}

/// Ids of the built-in instruments.
pub fn instrument_ids() -> impl Iterator<Item = &'static str> {
    BUILTIN.iter().map(|instrument| instrument.id.as_str())
}
