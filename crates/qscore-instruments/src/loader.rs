//! TOML instrument definitions.
//!
//! A definitions file holds `[[instrument]]` and `[[relabel]]` tables that
//! deserialize straight into the model types:
//!
//! ```toml
//! [[instrument]]
//! id = "demo"
//! name = "Demo scale"
//! items = { listed = ["demo1", "demo2"] }
//! item_range = { min = 0, max = 3 }
//!
//! [[instrument.recode]]
//! codes = [{ raw = 0, value = 0 }, { raw = 1, value = 1 }, { raw = 999 }]
//!
//! [[instrument.subscales]]
//! name = "tot"
//! n_items = 2
//! role = "total"
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use qscore_model::{Instrument, RelabelSet};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CatalogError, Result};

/// Instruments and relabel sets read from one definitions file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Definitions {
    #[serde(default, rename = "instrument")]
    pub instruments: Vec<Instrument>,
    #[serde(default, rename = "relabel")]
    pub relabel_sets: Vec<RelabelSet>,
}

impl Definitions {
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty() && self.relabel_sets.is_empty()
    }
}

/// Reads and checks a definitions file.
pub fn load_definitions(path: &Path) -> Result<Definitions> {
    let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let definitions = parse_at(&text, path.to_path_buf())?;
    debug!(
        path = %path.display(),
        instruments = definitions.instruments.len(),
        relabel_sets = definitions.relabel_sets.len(),
        "loaded definitions"
    );
    Ok(definitions)
}

/// Parses and checks definitions from a TOML string.
pub fn parse_definitions(text: &str) -> Result<Definitions> {
    parse_at(text, PathBuf::from("<inline>"))
}

fn parse_at(text: &str, path: PathBuf) -> Result<Definitions> {
    let definitions: Definitions =
        toml::from_str(text).map_err(|source| CatalogError::Toml { path, source })?;
    validate(&definitions)?;
    Ok(definitions)
}

fn validate(definitions: &Definitions) -> Result<()> {
    let mut ids = BTreeSet::new();
    for instrument in &definitions.instruments {
        instrument
            .check()
            .map_err(|source| CatalogError::Definition {
                id: instrument.id.clone(),
                source,
            })?;
        if !ids.insert(instrument.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                kind: "instrument",
                id: instrument.id.clone(),
            });
        }
    }
    let mut ids = BTreeSet::new();
    for set in &definitions.relabel_sets {
        if !ids.insert(set.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                kind: "relabel set",
                id: set.id.clone(),
            });
        }
    }
    Ok(())
}
