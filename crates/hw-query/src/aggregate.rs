//! Grouped and scalar reductions.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use hw_model::{ColumnDef, Dataset, Record, Schema, Value, ValueKind};
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result, require_column};

/// Reduction applied to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReduceKind {
    Sum,
    Mean,
    Max,
    Min,
    Count,
}

impl ReduceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Max => "max",
            Self::Min => "min",
            Self::Count => "count",
        }
    }

    /// Kind of the reduced value for a source column of kind `source`.
    #[must_use]
    pub const fn output_kind(self, source: ValueKind) -> ValueKind {
        match self {
            Self::Count => ValueKind::Integer,
            Self::Mean => ValueKind::Float,
            Self::Sum | Self::Max | Self::Min => source,
        }
    }
}

impl fmt::Display for ReduceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReduceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "mean" | "avg" => Ok(Self::Mean),
            "max" => Ok(Self::Max),
            "min" => Ok(Self::Min),
            "count" => Ok(Self::Count),
            other => Err(format!("unknown reduction '{other}'")),
        }
    }
}

/// One output column of a group aggregate: `output = kind(source)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reducer {
    pub output: String,
    pub source: String,
    pub kind: ReduceKind,
}

impl Reducer {
    pub fn new(output: impl Into<String>, source: impl Into<String>, kind: ReduceKind) -> Self {
        Self {
            output: output.into(),
            source: source.into(),
            kind,
        }
    }
}

/// Reduces rows per distinct combination of `group_by` values.
///
/// The result has the group columns first, then one column per reducer.
/// Groups appear in the order their first row appears in `rows`.
pub fn group_aggregate(rows: &Dataset, group_by: &[&str], reducers: &[Reducer]) -> Result<Dataset> {
    let schema = rows.schema();
    let key_indices = group_by
        .iter()
        .map(|column| require_column(schema, column))
        .collect::<Result<Vec<_>>>()?;
    let sources = reducers
        .iter()
        .map(|reducer| resolve_source(schema, &reducer.source, reducer.kind))
        .collect::<Result<Vec<_>>>()?;

    let mut columns: Vec<ColumnDef> = key_indices
        .iter()
        .map(|&i| schema.columns()[i].clone())
        .collect();
    for (reducer, &(_, source_kind)) in reducers.iter().zip(&sources) {
        columns.push(ColumnDef::new(
            reducer.output.clone(),
            reducer.kind.output_kind(source_kind),
        ));
    }
    let output_schema = Arc::new(Schema::new(columns)?);

    let mut slots: HashMap<Vec<String>, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Record>> = Vec::new();
    for record in rows {
        let key: Vec<String> = key_indices.iter().map(|&i| record.get(i).render()).collect();
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(record);
    }

    let mut output = Vec::with_capacity(groups.len());
    for members in &groups {
        let first = members[0];
        let mut values: Vec<Value> = key_indices.iter().map(|&i| first.get(i).clone()).collect();
        for (reducer, &(index, source_kind)) in reducers.iter().zip(&sources) {
            values.push(reduce(
                members.iter().map(|r| r.get(index)),
                &reducer.source,
                source_kind,
                reducer.kind,
            )?);
        }
        output.push(Record::new(values));
    }

    Ok(Dataset::from_rows(output_schema, output)?)
}

/// Reduces one column over every row of `rows`.
///
/// On empty input `sum` yields zero and `count` yields 0, while `mean`,
/// `max` and `min` fail with [`QueryError::EmptyInput`]. An integer `sum`
/// outside the `i64` range fails with [`QueryError::Overflow`].
pub fn total_by_reducer(rows: &Dataset, column: &str, kind: ReduceKind) -> Result<Value> {
    let (index, source_kind) = resolve_source(rows.schema(), column, kind)?;
    reduce(rows.iter().map(|r| r.get(index)), column, source_kind, kind)
}

fn resolve_source(schema: &Schema, column: &str, kind: ReduceKind) -> Result<(usize, ValueKind)> {
    let index = require_column(schema, column)?;
    let source_kind = schema.columns()[index].kind;
    if kind != ReduceKind::Count && !source_kind.is_numeric() {
        return Err(QueryError::NonNumericColumn {
            column: column.to_string(),
            kind: source_kind,
        });
    }
    Ok((index, source_kind))
}

fn reduce<'a, I>(values: I, column: &str, source_kind: ValueKind, kind: ReduceKind) -> Result<Value>
where
    I: Iterator<Item = &'a Value>,
{
    let empty = || QueryError::EmptyInput {
        operation: kind.as_str(),
        column: column.to_string(),
    };

    match kind {
        ReduceKind::Count => Ok(Value::Integer(values.count() as i64)),
        ReduceKind::Sum if source_kind == ValueKind::Integer => values
            .filter_map(Value::as_i64)
            .try_fold(0i64, i64::checked_add)
            .map(Value::Integer)
            .ok_or_else(|| QueryError::Overflow {
                operation: kind.as_str(),
                column: column.to_string(),
            }),
        ReduceKind::Sum => Ok(Value::Float(values.filter_map(Value::as_f64).sum())),
        ReduceKind::Mean => {
            let (sum, count) = values
                .filter_map(Value::as_f64)
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
            if count == 0 {
                return Err(empty());
            }
            Ok(Value::Float(sum / count as f64))
        }
        ReduceKind::Max | ReduceKind::Min => {
            let mut best: Option<&Value> = None;
            for value in values {
                let replace = match best {
                    None => true,
                    Some(current) => is_better(value, current, kind == ReduceKind::Max),
                };
                if replace {
                    best = Some(value);
                }
            }
            best.cloned().ok_or_else(empty)
        }
    }
}

/// Strictly better, so the earliest value wins ties.
pub(crate) fn is_better(candidate: &Value, current: &Value, maximize: bool) -> bool {
    match (candidate, current) {
        (Value::Integer(a), Value::Integer(b)) => {
            if maximize {
                a > b
            } else {
                a < b
            }
        }
        _ => match (candidate.as_f64(), current.as_f64()) {
            (Some(a), Some(b)) if b.is_nan() => !a.is_nan(),
            (Some(a), Some(b)) => {
                if maximize {
                    a > b
                } else {
                    a < b
                }
            }
            _ => false,
        },
    }
}
