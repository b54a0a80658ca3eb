//! Filter-and-summarize query engine.
//!
//! This crate answers the questions every dashboard view asks of a loaded
//! [`hw_model::Dataset`]:
//!
//! - **Filtering**: keep rows whose category values are in the selected sets
//! - **Grouping**: reduce numeric columns per distinct key combination
//! - **Totals**: reduce one column across all rows
//! - **Extremes**: find the row holding the maximum or minimum of a column
//! - **Dimensions**: list the filterable columns and their value domains
//!
//! All operations are pure. They never mutate their input, never perform
//! I/O and never log; every failure comes back as a [`QueryError`].
//!
//! # Example
//!
//! ```ignore
//! use hw_query::{FilterSpec, QueryEngine, Reducer, ReduceKind, group_aggregate};
//!
//! let engine = QueryEngine::new(dataset);
//! let spec = FilterSpec::new().with("City", ["Jacobabad", "Karachi"]);
//! let rows = engine.filter(&spec)?;
//! let deaths = group_aggregate(&rows, &["City"], &[Reducer::new("TotalDeaths", "Deaths", ReduceKind::Sum)])?;
//! ```

mod aggregate;
mod dimension;
mod engine;
mod error;
mod extreme;
mod filter;
mod summary;

// === Error Types ===
pub use error::{QueryError, Result};

// === Engine ===
pub use engine::QueryEngine;

// === Filtering ===
pub use filter::{EmptySelectionPolicy, FilterPolicy, FilterSpec, UnknownColumnPolicy, filter, filter_with};

// === Aggregation ===
pub use aggregate::{ReduceKind, Reducer, group_aggregate, total_by_reducer};
pub use extreme::{ExtremeKind, arg_extreme, arg_extreme_index};

// === Dimensions and Selections ===
pub use dimension::{DefaultSelection, Dimension, dimensions, initial_filter_spec};

// === Summary Cards ===
pub use summary::DashboardSummary;
