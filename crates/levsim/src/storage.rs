//! File-backed price series cache
//!
//! Directory structure:
//! ~/.levsim/
//!   levsim.log
//!   cache/
//!     spy.json
//!     qqq.json

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use levsim_core::{PriceSeries, SeriesCache};

use crate::util::io::atomic_write;

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// One JSON document per cache key under `{data_dir}/cache/`
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    root: PathBuf,
}

impl JsonFileCache {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            root: data_dir.join("cache"),
        }
    }

    /// Get the root path of the cache directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the path to a specific cache entry
    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_filename(key)))
    }
}

impl SeriesCache for JsonFileCache {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<PriceSeries>, Self::Error> {
        let path = self.entry_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let series = serde_json::from_str(&content).map_err(|e| {
            StorageError::Parse(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(key, path = %path.display(), "Loaded cached series");
        Ok(Some(series))
    }

    fn put(&mut self, key: &str, series: &PriceSeries) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create cache directory: {}", e)))?;

        let json = serde_json::to_string_pretty(series)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize series: {}", e)))?;

        let path = self.entry_path(key);
        atomic_write(&path, &json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        tracing::debug!(key, bars = series.len(), path = %path.display(), "Cached series");
        Ok(())
    }
}

/// Sanitize a filename to be safe for the filesystem
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
