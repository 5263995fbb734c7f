//! Error types shared by the scanner, catalog loader, and report writers.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("issue '{id}' has invalid pattern '{pattern}': {source}")]
    InvalidRegex {
        id: String,
        pattern: String,
        source: regex::Error,
    },

    #[error("issue '{id}' is defined more than once")]
    DuplicateId { id: String },

    #[error("catalog '{path}' is not valid: {message}")]
    Parse { path: String, message: String },

    #[error("catalog '{}' has unsupported extension (expected .toml, .yaml or .yml)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
