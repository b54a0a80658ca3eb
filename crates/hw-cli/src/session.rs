//! A loaded dataset plus the filter state a command runs against.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use hw_ingest::{BuiltinDataset, DatasetCache};
use hw_model::Dataset;
use hw_query::{DefaultSelection, FilterPolicy, FilterSpec, QueryEngine};

use crate::args::FilterArg;

/// Where the session's data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A CSV file, parsed with a built-in schema or an inferred one.
    File {
        path: PathBuf,
        schema: Option<BuiltinDataset>,
    },
    /// An embedded table.
    Builtin(BuiltinDataset),
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Builtin(BuiltinDataset::default())
    }
}

impl DataSource {
    /// Loads through `cache`.
    pub fn load(&self, cache: &mut DatasetCache) -> Result<Arc<Dataset>> {
        match self {
            Self::File { path, schema } => {
                let schema = schema
                    .map(BuiltinDataset::schema)
                    .transpose()?
                    .map(Arc::new);
                cache
                    .load_path(path, schema)
                    .with_context(|| format!("load {}", path.display()))
            }
            Self::Builtin(builtin) => cache
                .load_builtin(*builtin)
                .with_context(|| format!("load built-in dataset {builtin}")),
        }
    }
}

/// Engine plus the current filter spec.
#[derive(Debug, Clone)]
pub struct Session {
    engine: QueryEngine,
    spec: FilterSpec,
}

impl Session {
    /// Opens a session whose filters start at the configured defaults.
    pub fn open(
        dataset: Arc<Dataset>,
        policy: FilterPolicy,
        defaults: &BTreeMap<String, DefaultSelection>,
    ) -> Result<Self> {
        let engine = QueryEngine::new(dataset).with_policy(policy);
        let spec = engine
            .initial_spec(defaults)
            .context("resolve default selections")?;
        Ok(Self { engine, spec })
    }

    /// Replaces the selection of each named column.
    pub fn apply_filters<'a, I>(&mut self, filters: I)
    where
        I: IntoIterator<Item = &'a FilterArg>,
    {
        for filter in filters {
            tracing::debug!(column = %filter.column, values = ?filter.values, "filter override");
            self.spec
                .insert(filter.column.clone(), filter.values.iter().cloned());
        }
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    /// Rows that pass the current filters.
    pub fn view(&self) -> Result<Dataset> {
        self.engine.filter(&self.spec).context("apply filters")
    }
}
