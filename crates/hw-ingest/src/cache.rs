//! Explicit dataset cache keyed by source identity.
//!
//! Loading parses CSV and normalizes every cell; the cache keeps the result
//! so repeated requests for the same source share one `Arc<Dataset>`. Entries
//! stay until they are invalidated or the cache is cleared.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hw_model::{Dataset, Schema};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::builtin::BuiltinDataset;
use crate::error::{IngestError, Result};
use crate::loader::{load_csv, load_csv_bytes};

/// Compute the SHA256 hash of a byte buffer as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Identity of a data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    /// Canonicalized file path.
    Path(PathBuf),
    /// SHA-256 of uploaded bytes.
    Checksum(String),
    /// Embedded table.
    Builtin(BuiltinDataset),
}

impl SourceKey {
    /// Key for a file, resolved to its canonical path.
    pub fn for_path(path: &Path) -> Result<Self> {
        let canonical = path.canonicalize().map_err(|e| {
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
        Ok(Self::Path(canonical))
    }

    /// Key for uploaded bytes.
    pub fn for_bytes(bytes: &[u8]) -> Self {
        Self::Checksum(sha256_hex(bytes))
    }
}

/// Loaded datasets by source.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<SourceKey, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset for `key`, or runs `load` and caches its result.
    ///
    /// Failed loads are not cached.
    pub fn get_or_load<F>(&mut self, key: SourceKey, load: F) -> Result<Arc<Dataset>>
    where
        F: FnOnce() -> Result<Dataset>,
    {
        if let Some(dataset) = self.entries.get(&key) {
            debug!(?key, "dataset cache hit");
            return Ok(Arc::clone(dataset));
        }
        let dataset = Arc::new(load()?);
        info!(?key, rows = dataset.len(), "dataset cached");
        self.entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Loads (or reuses) a CSV file.
    pub fn load_path(&mut self, path: &Path, schema: Option<Arc<Schema>>) -> Result<Arc<Dataset>> {
        let key = SourceKey::for_path(path)?;
        self.get_or_load(key, || load_csv(path, schema))
    }

    /// Loads (or reuses) uploaded CSV bytes.
    pub fn load_bytes(
        &mut self,
        bytes: &[u8],
        schema: Option<Arc<Schema>>,
        origin: &str,
    ) -> Result<Arc<Dataset>> {
        let key = SourceKey::for_bytes(bytes);
        self.get_or_load(key, || load_csv_bytes(bytes, schema, origin))
    }

    /// Loads (or reuses) an embedded table.
    pub fn load_builtin(&mut self, builtin: BuiltinDataset) -> Result<Arc<Dataset>> {
        self.get_or_load(SourceKey::Builtin(builtin), || builtin.load())
    }

    /// Drops one entry; returns true if it was present.
    pub fn invalidate(&mut self, key: &SourceKey) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            debug!(?key, "dataset cache entry invalidated");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, key: &SourceKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
