//! Parsers for structured command-line values.
//!
//! - `--filter COLUMN=V1,V2` (an empty list selects nothing)
//! - `--reduce OUTPUT=SOURCE:KIND`
//! - `--sort COLUMN[:asc|:desc]`

use hw_model::SortOrder;
use hw_query::{ReduceKind, Reducer};
use thiserror::Error;

/// Malformed argument value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("expected COLUMN=V1,V2 but got '{0}'")]
    Filter(String),

    #[error("expected OUTPUT=SOURCE:KIND but got '{0}'")]
    Reducer(String),

    #[error("{0}")]
    ReduceKind(String),

    #[error("expected COLUMN or COLUMN:asc|desc but got '{0}'")]
    Sort(String),
}

/// One `--filter` constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterArg {
    pub column: String,
    pub values: Vec<String>,
}

/// One `--sort` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortArg {
    pub column: String,
    pub order: SortOrder,
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub fn parse_filter(text: &str) -> Result<FilterArg, ArgError> {
    let (column, values) = text
        .split_once('=')
        .ok_or_else(|| ArgError::Filter(text.to_string()))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(ArgError::Filter(text.to_string()));
    }
    Ok(FilterArg {
        column: column.to_string(),
        values: split_list(values),
    })
}

pub fn parse_reducer(text: &str) -> Result<Reducer, ArgError> {
    let malformed = || ArgError::Reducer(text.to_string());
    let (output, rest) = text.split_once('=').ok_or_else(malformed)?;
    let (source, kind) = rest.rsplit_once(':').ok_or_else(malformed)?;
    let (output, source) = (output.trim(), source.trim());
    if output.is_empty() || source.is_empty() {
        return Err(malformed());
    }
    let kind: ReduceKind = kind.parse().map_err(ArgError::ReduceKind)?;
    Ok(Reducer::new(output, source, kind))
}

pub fn parse_sort(text: &str) -> Result<SortArg, ArgError> {
    let malformed = || ArgError::Sort(text.to_string());
    let (column, order) = match text.rsplit_once(':') {
        Some((column, order)) => {
            let order = match order.trim().to_ascii_lowercase().as_str() {
                "asc" => SortOrder::Ascending,
                "desc" => SortOrder::Descending,
                _ => return Err(malformed()),
            };
            (column, order)
        }
        None => (text, SortOrder::Ascending),
    };
    let column = column.trim();
    if column.is_empty() {
        return Err(malformed());
    }
    Ok(SortArg {
        column: column.to_string(),
        order,
    })
}
