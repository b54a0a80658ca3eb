//! Multi-dimensional categorical filtering.

use std::collections::{BTreeMap, BTreeSet};

use hw_model::{Dataset, Value};
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Selected values per column.
///
/// A row passes when, for every constrained column, its rendered value is in
/// the column's set. Columns without an entry are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    constraints: BTreeMap<String, BTreeSet<String>>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain `column` to `values`, replacing any earlier constraint.
    #[must_use]
    pub fn with<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(column, values);
        self
    }

    pub fn insert<I, S>(&mut self, column: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints
            .insert(column.into(), values.into_iter().map(Into::into).collect());
    }

    pub fn get(&self, column: &str) -> Option<&BTreeSet<String>> {
        self.constraints.get(column)
    }

    pub fn constraints(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.constraints.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when no column is constrained.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// How an empty selection set is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    /// Nothing selected means no rows.
    #[default]
    MatchNothing,
    /// Nothing selected means the column is unconstrained.
    Unconstrained,
}

/// How a constraint on an undeclared column is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownColumnPolicy {
    /// No row can have a value for the column, so no row matches.
    #[default]
    MatchNothing,
    /// The constraint is dropped.
    Ignore,
    /// The filter fails with [`QueryError::UnknownColumn`].
    Reject,
}

/// Filter edge-case policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterPolicy {
    pub empty_selection: EmptySelectionPolicy,
    pub unknown_column: UnknownColumnPolicy,
}

/// Filters with the default [`FilterPolicy`]; never fails.
pub fn filter(dataset: &Dataset, spec: &FilterSpec) -> Result<Dataset> {
    filter_with(dataset, spec, FilterPolicy::default())
}

/// Returns the rows of `dataset` that satisfy `spec`, in their original order.
///
/// Every constrained column is resolved under the unknown-column policy
/// before any empty selection short-circuits.
pub fn filter_with(dataset: &Dataset, spec: &FilterSpec, policy: FilterPolicy) -> Result<Dataset> {
    let schema = dataset.schema();
    let mut resolved: Vec<(usize, &BTreeSet<String>)> = Vec::new();
    let mut unknown = false;

    for (column, accepted) in spec.constraints() {
        match schema.index_of(column) {
            Some(index) => resolved.push((index, accepted)),
            None => match policy.unknown_column {
                UnknownColumnPolicy::MatchNothing => unknown = true,
                UnknownColumnPolicy::Ignore => {}
                UnknownColumnPolicy::Reject => {
                    return Err(QueryError::UnknownColumn {
                        column: column.to_string(),
                    });
                }
            },
        }
    }
    if unknown {
        return Ok(Dataset::empty(dataset.schema_arc()));
    }

    let mut active = Vec::with_capacity(resolved.len());
    for (index, accepted) in resolved {
        if accepted.is_empty() {
            match policy.empty_selection {
                EmptySelectionPolicy::MatchNothing => return Ok(Dataset::empty(dataset.schema_arc())),
                EmptySelectionPolicy::Unconstrained => continue,
            }
        }
        active.push((index, accepted));
    }

    let kept = dataset
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            active
                .iter()
                .all(|(index, accepted)| is_selected(record.get(*index), accepted))
        })
        .map(|(i, _)| i);
    Ok(dataset.select_rows(kept))
}

fn is_selected(value: &Value, accepted: &BTreeSet<String>) -> bool {
    match value.as_str() {
        Some(text) => accepted.contains(text),
        None => accepted.contains(&value.render()),
    }
}
