//! Error types for the table model.

use thiserror::Error;

use crate::value::ValueKind;

/// Errors raised while building or querying a [`crate::Dataset`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Two columns in one schema share a name.
    #[error("duplicate column '{column}' in schema")]
    DuplicateColumn { column: String },

    /// A column name that the schema does not declare.
    #[error("column '{column}' not found in schema")]
    UnknownColumn { column: String },

    /// A record carries the wrong number of values.
    #[error("record has {found} values, schema declares {expected} columns")]
    ArityMismatch { expected: usize, found: usize },

    /// A value does not match the kind declared for its column.
    #[error("column '{column}' expects {expected} values, found {found}")]
    KindMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// Raw text could not be parsed into the column's kind.
    #[error("invalid {expected} value '{value}' in column '{column}'")]
    InvalidValue {
        column: String,
        value: String,
        expected: ValueKind,
    },

    /// A required column has no value.
    #[error("missing value in required column '{column}'")]
    MissingValue { column: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
