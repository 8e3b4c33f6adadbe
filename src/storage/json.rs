//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) so a
//! crash mid-write never leaves a truncated store behind.
//!
//! Atomic replacement does not prevent lost updates: two processes that load,
//! mutate and save concurrently still race, and the last save wins.

use crate::domain::{DirRankError, Entry, Result, MIN_SCORE};
use crate::storage::backend::Storage;
use std::path::{Path, PathBuf};

/// JSON file storage backend.
///
/// # File Format
///
/// A JSON array of records, fields in fixed order:
///
/// ```json
/// [
///   {
///     "path": "/home/user/projects/zoxide",
///     "score": 12.0,
///     "last_access": 1700000000
///   }
/// ]
/// ```
///
/// An empty or whitespace-only file is read as an empty collection.
#[derive(Debug)]
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonStorage {
    /// Opens a JSON storage backend at `file_path`.
    ///
    /// Parent directories are created automatically. The file itself is not
    /// touched until the first [`Storage::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if parent directory creation fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirrank::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/dirrank.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tracing::debug!(parent = ?parent, "creating parent directory");
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Path of the sibling file written before the atomic rename.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> Result<Vec<Entry>> {
        let _span = tracing::debug_span!("json_load", path = ?self.file_path).entered();

        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no existing store, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            tracing::debug!("store is empty");
            return Ok(Vec::new());
        }

        let entries: Vec<Entry> = serde_json::from_str(&contents).map_err(|e| {
            DirRankError::Format(format!(
                "failed to parse {}: {e}",
                self.file_path.display()
            ))
        })?;

        if let Some(bad) = entries
            .iter()
            .find(|e| !e.score.is_finite() || e.score < MIN_SCORE)
        {
            return Err(DirRankError::Format(format!(
                "invalid score {} for {} in {}",
                bad.score,
                bad.path,
                self.file_path.display()
            )));
        }

        tracing::debug!(count = entries.len(), "loaded entries");
        Ok(entries)
    }

    fn save(&mut self, entries: &[Entry]) -> Result<()> {
        let _span =
            tracing::debug_span!("json_save", path = ?self.file_path, count = entries.len())
                .entered();

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| DirRankError::Format(format!("failed to serialize entries: {e}")))?;

        let tmp_path = self.tmp_path();

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        if let Err(e) = std::fs::rename(&tmp_path, &self.file_path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!("storage saved successfully");
        Ok(())
    }
}
