//! Records and datasets.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::schema::Schema;
use crate::value::Value;

/// One row. Values are positional and aligned with the owning schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at a column index obtained from [`Schema::require`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the record.
    pub fn get(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

/// Direction of an explicit sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Immutable rectangular table.
///
/// Derived datasets (filters, sorts, aggregates) share the schema through an
/// [`Arc`] and never touch the rows of the dataset they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    schema: Arc<Schema>,
    rows: Vec<Record>,
}

impl Dataset {
    /// Builds a dataset, checking that every record matches the schema.
    pub fn from_rows(schema: Arc<Schema>, rows: Vec<Record>) -> Result<Self> {
        for row in &rows {
            check_record(&schema, row)?;
        }
        Ok(Self { schema, rows })
    }

    /// An empty dataset with the given schema.
    pub fn empty(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Shared handle to the schema, for building derived datasets.
    pub fn schema_arc(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }

    /// Index of a column, or [`ModelError::UnknownColumn`].
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.schema.require(name)
    }

    /// Value of `column` in row `row`.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.schema.index_of(column)?;
        self.rows.get(row).map(|r| r.get(index))
    }

    /// All values of one column in row order.
    pub fn column_values(&self, column: &str) -> Result<impl Iterator<Item = &Value> + '_> {
        let index = self.column_index(column)?;
        Ok(self.rows.iter().map(move |r| r.get(index)))
    }

    /// Distinct rendered values of a column, in first-appearance order.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for value in self.column_values(column)? {
            let text = value.render();
            if seen.insert(text.clone()) {
                values.push(text);
            }
        }
        Ok(values)
    }

    /// New dataset holding copies of the rows at `indices`, in the given order.
    ///
    /// Indices past the end are skipped.
    pub fn select_rows<I>(&self, indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let rows = indices
            .into_iter()
            .filter_map(|i| self.rows.get(i).cloned())
            .collect();
        Self {
            schema: self.schema_arc(),
            rows,
        }
    }

    /// Stable sort by one column.
    pub fn sorted_by(&self, column: &str, order: SortOrder) -> Result<Self> {
        let index = self.column_index(column)?;
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            let ordering = a.get(index).compare(b.get(index));
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        Ok(Self {
            schema: self.schema_arc(),
            rows,
        })
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn check_record(schema: &Schema, record: &Record) -> Result<()> {
    if record.values.len() != schema.len() {
        return Err(ModelError::ArityMismatch {
            expected: schema.len(),
            found: record.values.len(),
        });
    }
    for (column, value) in schema.columns().iter().zip(&record.values) {
        if !column.kind.accepts(value) {
            return Err(ModelError::KindMismatch {
                column: column.name.clone(),
                expected: column.kind,
                found: value.kind(),
            });
        }
    }
    Ok(())
}
