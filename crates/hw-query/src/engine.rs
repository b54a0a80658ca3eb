//! Query engine bound to one loaded dataset.

use std::collections::BTreeMap;
use std::sync::Arc;

use hw_model::Dataset;

use crate::dimension::{DefaultSelection, Dimension, dimensions, initial_filter_spec};
use crate::error::Result;
use crate::filter::{FilterPolicy, FilterSpec, filter_with};
use crate::summary::DashboardSummary;

/// Holds a shared, immutable dataset and the filter policy applied to it.
///
/// Cloning is cheap; sessions can each hold their own engine over one
/// `Arc<Dataset>`.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    dataset: Arc<Dataset>,
    policy: FilterPolicy,
}

impl QueryEngine {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            policy: FilterPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FilterPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Rows of the dataset selected by `spec`.
    pub fn filter(&self, spec: &FilterSpec) -> Result<Dataset> {
        filter_with(&self.dataset, spec, self.policy)
    }

    /// Filter dimensions and their value domains.
    pub fn dimensions(&self) -> Vec<Dimension> {
        dimensions(&self.dataset)
    }

    /// The filter spec the dashboard opens with.
    pub fn initial_spec(&self, defaults: &BTreeMap<String, DefaultSelection>) -> Result<FilterSpec> {
        initial_filter_spec(&self.dataset, defaults)
    }

    /// Summary cards for the rows selected by `spec`.
    pub fn summary(&self, spec: &FilterSpec) -> Result<Option<DashboardSummary>> {
        DashboardSummary::compute(&self.filter(spec)?)
    }
}
