//! On-disk copy of the local tracker data
//!
//! Written after every successful load from the tracker server so analytics
//! can still be computed when the server is unreachable on a later run.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::models::TrackerData;

/// JSON file holding a [`TrackerData`]
#[derive(Debug, Clone)]
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The cache file under the configured data directory
    pub fn from_paths(paths: &TrackerPaths) -> Self {
        Self::new(paths.local_data_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached data; None when nothing has been cached yet
    pub fn load(&self) -> TrackerResult<Option<TrackerData>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path).map_err(|e| {
            TrackerError::Io(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        let data = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            TrackerError::Json(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), "Loaded cached tracker data");
        Ok(Some(data))
    }

    /// Write the data atomically (temp file, then rename)
    pub fn save(&self, data: &TrackerData) -> TrackerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TrackerError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let file = File::create(&temp_path)
            .map_err(|e| TrackerError::Io(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)?;
        writer
            .flush()
            .map_err(|e| TrackerError::Io(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| TrackerError::Io(format!("Failed to sync data: {}", e)))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            TrackerError::Io(format!("Failed to rename temp file: {}", e))
        })?;

        debug!(path = %self.path.display(), "Saved tracker data");
        Ok(())
    }
}
