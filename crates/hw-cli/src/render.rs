//! Terminal tables.
//!
//! Each view is first reduced to a [`TableData`] of display strings, then drawn
//! with comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use hw_ingest::BuiltinDataset;
use hw_model::{Dataset, Record, Schema, Value};
use hw_query::{DashboardSummary, Dimension};
use serde::Serialize;

/// Shown instead of a table when the current filters leave nothing to compute.
pub const NO_DATA_MESSAGE: &str = "No data for current filters.";

/// Placeholder for empty text cells.
const EMPTY_CELL: &str = "-";

/// Display strings for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableData {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Columns drawn right-aligned.
    pub numeric: Vec<usize>,
}

impl TableData {
    fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            numeric: Vec::new(),
        }
    }

    fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Draws the table.
    #[must_use]
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(self.header.iter().map(|label| header_cell(label)));
        apply_table_style(&mut table);
        for row in &self.rows {
            table.add_row(row.iter().map(|text| body_cell(text)));
        }
        for &index in &self.numeric {
            align_column(&mut table, index, CellAlignment::Right);
        }
        table
    }
}

/// Every row of a dataset, one column per schema column.
pub fn dataset_data(dataset: &Dataset) -> TableData {
    let schema = dataset.schema();
    let mut data = TableData::new(schema.names());
    data.numeric = numeric_columns(schema);
    for record in dataset {
        data.push(record.values().iter().map(display_value));
    }
    data
}

/// A single record laid out as column/value pairs.
pub fn record_data(schema: &Schema, record: &Record) -> TableData {
    let mut data = TableData::new(["Column", "Value"]);
    for (column, value) in schema.columns().iter().zip(record.values()) {
        data.push([column.name.clone(), display_value(value)]);
    }
    data
}

/// Dashboard metric cards.
pub fn summary_data(summary: &DashboardSummary) -> TableData {
    let mut data = TableData::new(["Metric", "Value"]);
    data.push(["Records".to_string(), summary.records.to_string()]);
    data.push(["Cities".to_string(), summary.cities.to_string()]);
    data.push(["Total deaths".to_string(), summary.total_deaths.to_string()]);
    data.push([
        "Total heatstroke cases".to_string(),
        summary.total_heatstroke_cases.to_string(),
    ]);
    data.push([
        "Peak temperature".to_string(),
        display_value(&Value::Float(summary.peak_temp_c)),
    ]);
    data.push(["Peak city".to_string(), summary.peak_city.clone()]);
    data.push(["Peak year".to_string(), summary.peak_year.clone()]);
    data.push([
        "Mean agriculture loss %".to_string(),
        format!("{:.2}", summary.mean_agriculture_loss_pct),
    ]);
    data
}

/// Filter dimensions with their value domains.
pub fn dimensions_data(dimensions: &[Dimension]) -> TableData {
    let mut data = TableData::new(["Dimension", "Count", "Values"]);
    data.numeric = vec![1];
    for dimension in dimensions {
        data.push([
            dimension.column.clone(),
            dimension.values.len().to_string(),
            dimension.values.join(", "),
        ]);
    }
    data
}

/// Embedded datasets with their row counts.
pub fn datasets_data(entries: &[(BuiltinDataset, usize)]) -> TableData {
    let mut data = TableData::new(["Name", "Rows", "Description"]);
    data.numeric = vec![1];
    for (builtin, rows) in entries {
        data.push([
            builtin.name().to_string(),
            rows.to_string(),
            builtin.description().to_string(),
        ]);
    }
    data
}

fn numeric_columns(schema: &Schema) -> Vec<usize> {
    schema
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, column)| column.kind.is_numeric())
        .map(|(index, _)| index)
        .collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Text(text) if text.trim().is_empty() => EMPTY_CELL.to_string(),
        other => other.render(),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn body_cell(text: &str) -> Cell {
    if text == EMPTY_CELL {
        dim_cell(text)
    } else {
        Cell::new(text)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
