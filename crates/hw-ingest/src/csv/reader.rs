//! CSV reading into string-typed Polars DataFrames.
//!
//! Type inference is disabled: every column comes back as text and the
//! dataset schema decides how each cell is parsed.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (64 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Check file size before loading.
fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Rejects empty input and UTF-16 byte-order marks.
///
/// A UTF-8 BOM is accepted and stripped from header names later.
fn validate_encoding(bytes: &[u8], origin: &str) -> Result<()> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyCsv {
            origin: origin.to_string(),
        });
    }
    let encoding = match bytes.get(0..2) {
        Some([0xFF, 0xFE]) => Some("UTF-16 LE"),
        Some([0xFE, 0xFF]) => Some("UTF-16 BE"),
        _ => None,
    };
    if let Some(encoding) = encoding {
        return Err(IngestError::UnsupportedEncoding {
            origin: origin.to_string(),
            encoding,
        });
    }
    Ok(())
}

fn read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

/// Reads a CSV file into a DataFrame whose columns are all strings.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_csv_frame_from_bytes(&bytes, &path.display().to_string())
}

/// Reads in-memory CSV bytes (an upload or an embedded table).
pub fn read_csv_frame_from_bytes(bytes: &[u8], origin: &str) -> Result<DataFrame> {
    validate_encoding(bytes, origin)?;

    read_options()
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            origin: origin.to_string(),
            message: e.to_string(),
        })
}

/// Header names of a frame with BOM and surrounding whitespace removed.
pub fn normalized_headers(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.trim_start_matches('\u{feff}').trim().to_string())
        .collect()
}

/// Cells of one column as optional strings; nulls become `None`.
pub fn column_cells(column: &Column) -> Result<Vec<Option<String>>> {
    let as_text = column.cast(&DataType::String)?;
    let chunked = as_text.str()?;
    Ok(chunked
        .iter()
        .map(|cell| cell.map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_frame_keeps_text() {
        let file = create_temp_csv("City,Year,Deaths\nKarachi,2024,568\nLahore,2023,\n");
        let df = read_csv_frame(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(normalized_headers(&df), vec!["City", "Year", "Deaths"]);
        let deaths = column_cells(df.column("Deaths").unwrap()).unwrap();
        assert_eq!(deaths, vec![Some("568".to_string()), None]);
    }

    #[test]
    fn test_read_csv_frame_missing_file() {
        let result = read_csv_frame(Path::new("/no/such/heatwave.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_csv_frame_too_large() {
        let file = create_temp_csv("City\nKarachi\n");
        let result = check_file_size_with_limit(file.path(), 4);
        assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
    }

    #[test]
    fn test_read_from_bytes_with_bom_and_quotes() {
        let bytes = "\u{feff}City,Impact\nKarachi,\"Tankers, rationing\"\n".as_bytes();
        let df = read_csv_frame_from_bytes(bytes, "upload").unwrap();
        assert_eq!(normalized_headers(&df), vec!["City", "Impact"]);
        let impact = column_cells(&df.get_columns()[1]).unwrap();
        assert_eq!(impact, vec![Some("Tankers, rationing".to_string())]);
    }

    #[test]
    fn test_validate_encoding() {
        assert!(matches!(
            validate_encoding(b"", "upload"),
            Err(IngestError::EmptyCsv { .. })
        ));
        assert!(matches!(
            validate_encoding(&[0xFF, 0xFE, b'C'], "upload"),
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
        assert!(validate_encoding(b"City\n", "upload").is_ok());
    }
}
