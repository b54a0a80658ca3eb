//! Error types for query operations.

use hw_model::{ModelError, ValueKind};
use thiserror::Error;

/// Errors returned by the query engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// A reducer or extremal lookup that needs at least one row got none.
    #[error("{operation} of '{column}' needs at least one row")]
    EmptyInput {
        operation: &'static str,
        column: String,
    },

    /// An integer reduction left the `i64` range.
    #[error("{operation} of '{column}' overflows a 64-bit integer")]
    Overflow {
        operation: &'static str,
        column: String,
    },

    /// A column name that the dataset does not declare.
    #[error("column '{column}' not found in dataset")]
    UnknownColumn { column: String },

    /// A numeric reduction was asked of a non-numeric column.
    #[error("column '{column}' holds {kind} values, a numeric column is required")]
    NonNumericColumn { column: String, kind: ValueKind },

    /// Building a derived dataset failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl QueryError {
    /// Returns true for [`QueryError::EmptyInput`], which renderers show as a
    /// "no data" state rather than a failure.
    #[must_use]
    pub const fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Column index lookup reporting unknown names as [`QueryError::UnknownColumn`].
pub(crate) fn require_column(schema: &hw_model::Schema, column: &str) -> Result<usize> {
    schema
        .index_of(column)
        .ok_or_else(|| QueryError::UnknownColumn {
            column: column.to_string(),
        })
}
