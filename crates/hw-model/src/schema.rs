//! Column descriptors.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::value::{Value, ValueKind};

/// What a loader does when a cell is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Empty cells are a load error.
    Required,
    /// Empty cells are replaced by this default or sentinel.
    Fill(Value),
}

/// A declared column: name, kind and missing-value rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ValueKind,
    pub missing: MissingPolicy,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            missing: MissingPolicy::Required,
        }
    }

    pub fn category(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Category)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Text)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Float)
    }

    /// Fill empty cells with `value` instead of rejecting them.
    #[must_use]
    pub fn fill(mut self, value: impl Into<Value>) -> Self {
        self.missing = MissingPolicy::Fill(value.into());
        self
    }

    /// Resolves a raw cell into a typed value, applying the missing policy.
    ///
    /// `None` and whitespace-only text count as missing.
    pub fn resolve(&self, raw: Option<&str>) -> Result<Value> {
        match raw.filter(|s| !s.trim().is_empty()) {
            Some(text) => self.kind.parse(&self.name, text),
            None => match &self.missing {
                MissingPolicy::Fill(value) => Ok(value.clone()),
                MissingPolicy::Required => Err(ModelError::MissingValue {
                    column: self.name.clone(),
                }),
            },
        }
    }
}

/// Ordered set of column descriptors with unique names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<ColumnDef>,
}

impl Schema {
    /// Builds a schema, rejecting duplicate column names and fill values of
    /// the wrong kind.
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self> {
        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx].iter().any(|c| c.name == column.name) {
                return Err(ModelError::DuplicateColumn {
                    column: column.name.clone(),
                });
            }
            if let MissingPolicy::Fill(value) = &column.missing
                && !column.kind.accepts(value)
            {
                return Err(ModelError::KindMismatch {
                    column: column.name.clone(),
                    expected: column.kind,
                    found: value.kind(),
                });
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Like [`Schema::index_of`] but reports unknown names as an error.
    pub fn require(&self, name: &str) -> Result<usize> {
        self.index_of(name).ok_or_else(|| ModelError::UnknownColumn {
            column: name.to_string(),
        })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Category columns, in declaration order. These are the filter dimensions.
    pub fn dimensions(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns
            .iter()
            .filter(|c| c.kind == ValueKind::Category)
    }
}
