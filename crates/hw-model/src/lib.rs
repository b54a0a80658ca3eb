//! Typed table model for Pakistani heatwave and climate statistics.
//!
//! A [`Dataset`] is an immutable, rectangular table: an ordered list of
//! [`Record`]s that all conform to one [`Schema`]. The schema is validated
//! once, when the dataset is built, so downstream code can rely on every row
//! carrying a correctly typed value for every declared column.
//!
//! # Module Organization
//!
//! - [`value`]: Cell values and their kinds
//! - [`schema`]: Column descriptors and missing-value policies
//! - [`dataset`]: Records, datasets and derived views
//! - [`catalog`]: Schemas of the built-in heatwave and climate tables
//! - [`numeric`]: Number parsing and formatting shared by loaders and writers

pub mod catalog;
pub mod dataset;
pub mod error;
pub mod numeric;
pub mod schema;
pub mod value;

pub use dataset::{Dataset, Record, SortOrder};
pub use error::{ModelError, Result};
pub use numeric::{format_numeric, parse_f64, parse_i64};
pub use schema::{ColumnDef, MissingPolicy, Schema};
pub use value::{Value, ValueKind};
