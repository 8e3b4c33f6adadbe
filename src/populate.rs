//! Bulk population by directory traversal.
//!
//! A [`Populator`] walks a directory tree and offers every directory that passes
//! its filters to [`Database::add`]. It makes no relevance judgment of its own
//! beyond the keep/discard patterns; ranking is left entirely to usage.

use crate::database::Database;
use crate::domain::Result;
use regex::Regex;
use std::path::Path;
use walkdir::WalkDir;

/// Directory-tree walker feeding a [`Database`].
///
/// # Examples
///
/// ```no_run
/// use dirrank::{Config, Database, Populator};
///
/// let mut db = Database::open(&Config::default())?;
/// let added = Populator::new()
///     .keep(r"projects")?
///     .discard(r"/(\.git|node_modules|target)(/|$)")?
///     .max_depth(4)
///     .populate(&mut db, "/home/user")?;
/// println!("added {added} directories");
/// # Ok::<(), dirrank::DirRankError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Populator {
    keep: Option<Regex>,
    discard: Option<Regex>,
    max_depth: Option<usize>,
}

impl Populator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only directories whose path matches `pattern` are added.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regex.
    pub fn keep(mut self, pattern: &str) -> Result<Self> {
        self.keep = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Directories whose path matches `pattern` are skipped.
    ///
    /// Skipped directories are still descended into.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regex.
    pub fn discard(mut self, pattern: &str) -> Result<Self> {
        self.discard = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Limits how deep below the root the walk goes. The root is depth 0.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Returns true if `path` passes the keep and discard filters.
    #[must_use]
    pub fn accepts(&self, path: &str) -> bool {
        if let Some(keep) = &self.keep {
            if !keep.is_match(path) {
                return false;
            }
        }
        if let Some(discard) = &self.discard {
            if discard.is_match(path) {
                return false;
            }
        }
        true
    }

    /// Walks `root` and adds every accepted directory, the root included.
    ///
    /// Unreadable subtrees are skipped. Symlinks are not followed. Returns the
    /// number of directories added.
    ///
    /// # Errors
    ///
    /// Returns an error if an `add` fails to persist.
    pub fn populate(&self, db: &mut Database, root: impl AsRef<Path>) -> Result<usize> {
        let root = root.as_ref();
        let _span = tracing::debug_span!("populate", root = ?root).entered();

        let mut walker = WalkDir::new(root);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut added = 0;
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable path");
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let Some(path) = entry.path().to_str() else {
                tracing::debug!(path = ?entry.path(), "skipping non UTF-8 path");
                continue;
            };
            if !self.accepts(path) {
                tracing::trace!(path = %path, "filtered out");
                continue;
            }

            db.add(entry.path())?;
            added += 1;
        }

        tracing::debug!(added, "population complete");
        Ok(added)
    }
}
