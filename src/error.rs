//! Fatal import errors.
//!
//! Anything in [`ImportError`] aborts the run. Per-record problems never
//! reach this type; they are counted in [`ImportSummary`](crate::types::ImportSummary).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to read input {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported input format for {} (expected .csv or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("CSV header could not be read: {0}")]
    CsvHeader(#[source] csv::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON root must be an array of objects, found {0}")]
    JsonRootNotArray(&'static str),

    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write example CSV: {0}")]
    ExampleCsv(#[source] csv::Error),
}
