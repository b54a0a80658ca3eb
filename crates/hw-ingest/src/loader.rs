//! Entry points that turn a CSV source into a typed dataset.

use std::path::Path;
use std::sync::Arc;

use hw_model::{Dataset, Schema};
use polars::prelude::DataFrame;

use crate::csv::{read_csv_frame, read_csv_frame_from_bytes};
use crate::error::Result;
use crate::infer::infer_schema;
use crate::normalize::dataset_from_frame;

/// Loads a CSV file.
///
/// With `schema = None` the schema is inferred from the file contents.
pub fn load_csv(path: &Path, schema: Option<Arc<Schema>>) -> Result<Dataset> {
    let origin = path.display().to_string();
    let df = read_csv_frame(path)?;
    finish(&df, schema, &origin)
}

/// Loads CSV bytes such as an upload. `origin` names the source in errors and logs.
pub fn load_csv_bytes(bytes: &[u8], schema: Option<Arc<Schema>>, origin: &str) -> Result<Dataset> {
    let df = read_csv_frame_from_bytes(bytes, origin)?;
    finish(&df, schema, origin)
}

fn finish(df: &DataFrame, schema: Option<Arc<Schema>>, origin: &str) -> Result<Dataset> {
    let schema = match schema {
        Some(schema) => schema,
        None => {
            let inferred = infer_schema(df)?;
            tracing::info!(origin, columns = inferred.len(), "inferred schema");
            Arc::new(inferred)
        }
    };
    let dataset = dataset_from_frame(df, schema, origin)?;
    tracing::debug!(origin, rows = dataset.len(), "loaded dataset");
    Ok(dataset)
}
