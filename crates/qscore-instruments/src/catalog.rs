//! Built-in definitions merged with definitions loaded at run time.

use qscore_model::{Instrument, RelabelSet};
use tracing::info;

use crate::error::{CatalogError, Result};
use crate::loader::Definitions;

/// The instruments and relabel sets available to a scoring run.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    instruments: Vec<Instrument>,
    relabel_sets: Vec<RelabelSet>,
}

impl Catalog {
    /// A catalogue holding every built-in definition.
    pub fn builtin() -> Self {
        Self {
            instruments: crate::all_instruments().to_vec(),
            relabel_sets: crate::relabel_sets().to_vec(),
        }
    }

    /// Adds loaded definitions.
    ///
    /// An id already in the catalogue is an error unless `replace` is set, in
    /// which case the loaded definition takes its place.
    pub fn extend(&mut self, definitions: Definitions, replace: bool) -> Result<()> {
        for instrument in definitions.instruments {
            let id = instrument.id.clone();
            if !upsert(&mut self.instruments, instrument, |i| i.id == id, replace) {
                return Err(CatalogError::DuplicateId {
                    kind: "instrument",
                    id,
                });
            }
        }
        for set in definitions.relabel_sets {
            let id = set.id.clone();
            if !upsert(&mut self.relabel_sets, set, |s| s.id == id, replace) {
                return Err(CatalogError::DuplicateId {
                    kind: "relabel set",
                    id,
                });
            }
        }
        info!(
            instruments = self.instruments.len(),
            relabel_sets = self.relabel_sets.len(),
            "catalogue extended"
        );
        Ok(())
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn relabel_sets(&self) -> &[RelabelSet] {
        &self.relabel_sets
    }

    pub fn instrument(&self, id: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }

    /// Instruments for `ids`, in the order given.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Instrument>> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.instrument(id)
                    .cloned()
                    .ok_or_else(|| CatalogError::UnknownInstrument(id.to_string()))
            })
            .collect()
    }

    pub fn relabel_set(&self, id: &str) -> Result<&RelabelSet> {
        self.relabel_sets
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CatalogError::UnknownRelabelSet(id.to_string()))
    }
}

/// Inserts or replaces `entry`; false when it collides and `replace` is unset.
fn upsert<T>(entries: &mut Vec<T>, entry: T, same_id: impl Fn(&T) -> bool, replace: bool) -> bool {
    match entries.iter().position(same_id) {
        Some(_) if !replace => false,
        Some(index) => {
            entries[index] = entry;
            true
        }
        None => {
            entries.push(entry);
            true
        }
    }
}
