//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait that abstracts over persistence
//! backends. The database treats its backing store as one atomic unit: the whole
//! entry collection is read once on open and rewritten after every mutation.

use crate::domain::{Entry, Result};

/// Abstraction over persistent storage backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes (default)
///
/// # Examples
///
/// ```no_run
/// use dirrank::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/dirrank.json"))?;
/// let entries = storage.load()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Reads the complete entry collection.
    ///
    /// An absent store yields an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`DirRankError::Format`](crate::DirRankError::Format) if the store
    /// exists but cannot be parsed, or an I/O error if it cannot be read.
    fn load(&self) -> Result<Vec<Entry>>;

    /// Replaces the stored collection with `entries`.
    ///
    /// The collection is only durably committed once this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the store cannot be written.
    fn save(&mut self, entries: &[Entry]) -> Result<()>;
}
