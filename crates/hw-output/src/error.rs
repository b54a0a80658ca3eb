//! Error types for output generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing a dataset.
#[derive(Debug, Error)]
pub enum OutputError {
    /// CSV encoding failed.
    #[error("failed to write CSV: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// Output directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Buffered CSV writer could not be flushed.
    #[error("failed to flush CSV buffer: {message}")]
    Flush { message: String },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OutputError::FileWrite {
            path: PathBuf::from("/tmp/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write file /tmp/out.csv: denied");
    }
}
