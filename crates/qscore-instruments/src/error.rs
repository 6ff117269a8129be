use std::path::PathBuf;

use qscore_model::DefinitionError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read definitions {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse definitions {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid definition '{id}': {source}")]
    Definition {
        id: String,
        #[source]
        source: DefinitionError,
    },

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("unknown relabel set: {0}")]
    UnknownRelabelSet(String),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
