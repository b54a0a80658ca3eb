//! Schema inference for uploads without a known schema.

use hw_model::{ColumnDef, Schema, ValueKind, parse_f64};
use polars::prelude::DataFrame;

use crate::csv::{column_cells, normalized_headers};
use crate::error::Result;

/// Columns always treated as categories regardless of content.
const CATEGORY_COLUMNS: &[&str] = &["Year"];

/// Infers a schema from the cells of a string-typed frame.
///
/// - All non-empty cells are plain integers: integer, missing filled with 0
/// - All non-empty cells parse as `f64`: float, missing filled with 0
/// - Otherwise (or for `Year`): category, missing filled with an empty string
pub fn infer_schema(df: &DataFrame) -> Result<Schema> {
    let headers = normalized_headers(df);
    let mut columns = Vec::with_capacity(headers.len());

    for (name, column) in headers.into_iter().zip(df.get_columns()) {
        let kind = if CATEGORY_COLUMNS.contains(&name.as_str()) {
            ValueKind::Category
        } else {
            infer_kind(&column_cells(column)?)
        };
        tracing::debug!(column = %name, kind = %kind, "inferred column kind");
        let def = match kind {
            ValueKind::Integer => ColumnDef::integer(name).fill(0i64),
            ValueKind::Float => ColumnDef::float(name).fill(0.0_f64),
            ValueKind::Text | ValueKind::Category => ColumnDef::category(name).fill(""),
        };
        columns.push(def);
    }

    Ok(Schema::new(columns)?)
}

fn infer_kind(cells: &[Option<String>]) -> ValueKind {
    let present: Vec<&str> = cells
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if present.is_empty() {
        return ValueKind::Category;
    }
    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        return ValueKind::Integer;
    }
    if present.iter().all(|s| parse_f64(s).is_some()) {
        return ValueKind::Float;
    }
    ValueKind::Category
}
