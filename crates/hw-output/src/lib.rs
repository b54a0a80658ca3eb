//! Output generation for filtered views.
//!
//! Serializes a [`hw_model::Dataset`] back to CSV so the current view can be
//! downloaded and later loaded again with the same schema.

mod error;
mod export;

pub use error::{OutputError, Result};
pub use export::{write_csv, write_csv_file};
