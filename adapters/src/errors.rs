//! Custom error types specific to the `adapters` crate.
//!
//! These errors cover everything that can go wrong while loading a model
//! artifact from disk. They are fatal at startup; a loaded model never
//! produces an `AdapterError` at prediction time.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdapterError {
    #[error("Cannot read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model feature schema mismatch: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
}
