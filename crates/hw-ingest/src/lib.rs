//! Heatwave data ingestion.
//!
//! This crate turns CSV sources into typed [`hw_model::Dataset`]s.
//!
//! # Features
//!
//! - **CSV Loading**: Read files or in-memory bytes through Polars
//! - **Normalization**: Apply each column's missing-value policy (defaults and sentinels)
//! - **Schema Inference**: Derive a schema for uploads that have none
//! - **Built-in Data**: Heatwave, climate overview and rainfall tables embedded in the binary
//! - **Caching**: Reuse loaded datasets by path, upload checksum or built-in name
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use hw_ingest::{BuiltinDataset, DatasetCache};
//!
//! let mut cache = DatasetCache::new();
//! let heatwave = cache.load_builtin(BuiltinDataset::Heatwave)?;
//! let upload = cache.load_path(Path::new("data/heat_2024.csv"), None)?;
//! ```

mod builtin;
mod cache;
mod csv;
mod error;
mod infer;
mod loader;
mod normalize;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{MAX_CSV_FILE_SIZE, read_csv_frame, read_csv_frame_from_bytes};

// === Loading ===
pub use infer::infer_schema;
pub use loader::{load_csv, load_csv_bytes};
pub use normalize::dataset_from_frame;

// === Built-in Data ===
pub use builtin::BuiltinDataset;

// === Caching ===
pub use cache::{DatasetCache, SourceKey, sha256_hex};
