//! CSV reading utilities.

mod reader;

pub use reader::{
    MAX_CSV_FILE_SIZE, column_cells, normalized_headers, read_csv_frame,
    read_csv_frame_from_bytes,
};
