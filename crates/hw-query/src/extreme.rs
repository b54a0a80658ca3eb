//! Extremal-row lookup (the row holding a column's maximum or minimum).

use hw_model::{Dataset, Record};
use serde::{Deserialize, Serialize};

use crate::aggregate::is_better;
use crate::error::{QueryError, Result, require_column};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremeKind {
    Max,
    Min,
}

impl ExtremeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Min => "min",
        }
    }
}

/// Position of the row holding the extreme value of `column`.
///
/// Ties resolve to the first row in stored order.
pub fn arg_extreme_index(rows: &Dataset, column: &str, kind: ExtremeKind) -> Result<usize> {
    let schema = rows.schema();
    let index = require_column(schema, column)?;
    let column_kind = schema.columns()[index].kind;
    if !column_kind.is_numeric() {
        return Err(QueryError::NonNumericColumn {
            column: column.to_string(),
            kind: column_kind,
        });
    }

    let maximize = kind == ExtremeKind::Max;
    let mut best: Option<usize> = None;
    for (position, record) in rows.iter().enumerate() {
        let replace = match best {
            None => true,
            Some(current) => is_better(record.get(index), rows.rows()[current].get(index), maximize),
        };
        if replace {
            best = Some(position);
        }
    }
    best.ok_or_else(|| QueryError::EmptyInput {
        operation: kind.as_str(),
        column: column.to_string(),
    })
}

/// The row holding the extreme value of `column`.
///
/// Fails with [`QueryError::EmptyInput`] when `rows` is empty; callers check
/// for an empty filter result before asking.
pub fn arg_extreme<'a>(rows: &'a Dataset, column: &str, kind: ExtremeKind) -> Result<&'a Record> {
    let position = arg_extreme_index(rows, column, kind)?;
    Ok(&rows.rows()[position])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hw_model::{ColumnDef, Schema, Value};

    use super::*;

    fn temps(values: &[(&str, f64)]) -> Dataset {
        let schema = Arc::new(
            Schema::new(vec![ColumnDef::category("City"), ColumnDef::float("Temp")]).unwrap(),
        );
        let rows = values
            .iter()
            .map(|(city, temp)| Record::new(vec![(*city).into(), (*temp).into()]))
            .collect();
        Dataset::from_rows(schema, rows).unwrap()
    }

    #[test]
    fn test_max_and_min() {
        let ds = temps(&[("Lahore", 47.5), ("Jacobabad", 51.0), ("Quetta", 38.0)]);
        let hottest = arg_extreme(&ds, "Temp", ExtremeKind::Max).unwrap();
        assert_eq!(hottest.get(0), &Value::from("Jacobabad"));
        assert_eq!(arg_extreme_index(&ds, "Temp", ExtremeKind::Min).unwrap(), 2);
    }

    #[test]
    fn test_ties_resolve_to_first_row() {
        let ds = temps(&[("A", 47.0), ("B", 47.0)]);
        assert_eq!(
            arg_extreme(&ds, "Temp", ExtremeKind::Max).unwrap().get(0),
            &Value::from("A")
        );
        assert_eq!(
            arg_extreme(&ds, "Temp", ExtremeKind::Min).unwrap().get(0),
            &Value::from("A")
        );
    }

    #[test]
    fn test_nan_never_wins() {
        let ds = temps(&[("A", f64::NAN), ("B", 40.0), ("C", f64::NAN)]);
        assert_eq!(arg_extreme_index(&ds, "Temp", ExtremeKind::Max).unwrap(), 1);
    }

    #[test]
    fn test_empty_and_invalid_input() {
        let ds = temps(&[]);
        let err = arg_extreme(&ds, "Temp", ExtremeKind::Max).unwrap_err();
        assert!(err.is_empty_input());

        let ds = temps(&[("A", 1.0)]);
        assert!(matches!(
            arg_extreme(&ds, "City", ExtremeKind::Max),
            Err(QueryError::NonNumericColumn { .. })
        ));
        assert!(matches!(
            arg_extreme(&ds, "Rain", ExtremeKind::Min),
            Err(QueryError::UnknownColumn { .. })
        ));
    }
}
