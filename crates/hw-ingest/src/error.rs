//! Error types for data ingestion.

use std::path::PathBuf;

use hw_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {origin}: {message}")]
    CsvParse { origin: String, message: String },

    /// CSV source is empty.
    #[error("CSV source is empty: {origin}")]
    EmptyCsv { origin: String },

    /// Byte-order mark of an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {origin}")]
    UnsupportedEncoding {
        origin: String,
        encoding: &'static str,
    },

    // === Normalization Errors ===
    /// A required schema column is absent from the CSV header.
    #[error("required column '{column}' not found in {origin}")]
    MissingColumn { column: String, origin: String },

    /// A data line could not be converted to a typed record.
    #[error("{origin} line {line}: {source}")]
    InvalidRecord {
        origin: String,
        line: usize,
        #[source]
        source: ModelError,
    },

    /// Schema or dataset construction failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    // === Built-in Data ===
    /// Name does not match any embedded dataset.
    #[error("unknown built-in dataset '{name}'")]
    UnknownBuiltin { name: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
