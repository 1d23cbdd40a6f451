use std::path::PathBuf;

use thiserror::Error;

/// Errors from the key-value store backing the result history.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from building a prompt corpus.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CorpusError {
    #[error("corpus has no texts")]
    Empty,
    #[error("corpus text {0} has no words")]
    BlankText(usize),
    #[error("embedded corpus {0} is missing or malformed")]
    Embedded(String),
}
