//! CSV serialization of a dataset.
//!
//! The header is the schema's column names in order. Each cell is the value's
//! rendered text: floats use the shortest form that parses back to the same
//! number, so a written view loads again unchanged under the same schema.

use std::fs;
use std::path::Path;

use hw_model::Dataset;

use crate::error::{OutputError, Result};

/// Serializes `dataset` to CSV bytes.
pub fn write_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(dataset.schema().names())?;
    for record in dataset {
        writer.write_record(record.values().iter().map(|value| value.render()))?;
    }
    writer.into_inner().map_err(|e| OutputError::Flush {
        message: e.error().to_string(),
    })
}

/// Writes `dataset` as CSV to `path`, creating parent directories as needed.
pub fn write_csv_file(dataset: &Dataset, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let bytes = write_csv(dataset)?;
    fs::write(path, &bytes).map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        bytes = bytes.len(),
        "wrote CSV"
    );
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
