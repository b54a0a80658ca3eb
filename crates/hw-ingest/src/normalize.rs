//! Conversion of raw string frames into typed datasets.
//!
//! Every schema column is matched to a CSV column by name. Empty cells go
//! through the column's missing policy, so the resulting dataset has a value
//! (possibly a sentinel) in every cell.

use std::sync::Arc;

use hw_model::{Dataset, MissingPolicy, Record, Schema, Value};
use polars::prelude::DataFrame;

use crate::csv::{column_cells, normalized_headers};
use crate::error::{IngestError, Result};

/// Builds a dataset from a string-typed frame using `schema`.
///
/// Columns the schema does not declare are ignored. A declared column that
/// is absent is an error unless it has a fill value, in which case every row
/// receives the fill.
pub fn dataset_from_frame(df: &DataFrame, schema: Arc<Schema>, origin: &str) -> Result<Dataset> {
    let headers = normalized_headers(df);
    let frame_columns = df.get_columns();

    for header in &headers {
        if schema.index_of(header).is_none() {
            tracing::warn!(origin, column = %header, "ignoring column not declared in schema");
        }
    }

    let mut cells: Vec<Option<Vec<Option<String>>>> = Vec::with_capacity(schema.len());
    for column in schema.columns() {
        match headers.iter().position(|h| *h == column.name) {
            Some(idx) => cells.push(Some(column_cells(&frame_columns[idx])?)),
            None => match &column.missing {
                MissingPolicy::Fill(value) => {
                    tracing::warn!(
                        origin,
                        column = %column.name,
                        fill = %value,
                        "column absent from CSV, filling every row"
                    );
                    cells.push(None);
                }
                MissingPolicy::Required => {
                    return Err(IngestError::MissingColumn {
                        column: column.name.clone(),
                        origin: origin.to_string(),
                    });
                }
            },
        }
    }

    let mut rows = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut values: Vec<Value> = Vec::with_capacity(schema.len());
        for (column, source_cells) in schema.columns().iter().zip(&cells) {
            let raw = source_cells
                .as_ref()
                .and_then(|c| c.get(row))
                .and_then(Option::as_deref);
            let value = column
                .resolve(raw)
                .map_err(|source| IngestError::InvalidRecord {
                    origin: origin.to_string(),
                    line: row + 2,
                    source,
                })?;
            values.push(value);
        }
        rows.push(Record::new(values));
    }

    Ok(Dataset::from_rows(schema, rows)?)
}
