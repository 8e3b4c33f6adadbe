//! The ranked directory database.
//!
//! [`Database`] owns the in-memory entry collection and is the only thing that
//! mutates it. Every mutation is written through to the [`Storage`] backend before
//! the call returns; if that write fails, the in-memory collection is rolled back
//! so it never runs ahead of what is on disk.
//!
//! # Concurrency
//!
//! A `Database` is meant for one process at a time. Two processes opening the same
//! store each work on their own snapshot and the last save wins.

use crate::domain::{Entry, Matcher, Result};
use crate::infrastructure::paths;
use crate::storage::{frecency, AgingPolicy, JsonStorage, Storage};
use crate::Config;
use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;
use std::path::Path;

/// Source of the current time in Unix seconds.
type Clock = Box<dyn Fn() -> i64 + Send>;

/// Decides whether a stored path is currently present on disk.
type ExistenceCheck = Box<dyn Fn(&str) -> bool + Send>;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Frecency-ranked set of visited directories.
///
/// # Examples
///
/// ```no_run
/// use dirrank::{Config, Database};
///
/// let mut db = Database::open(&Config::default())?;
/// db.add("/home/user/projects/zoxide")?;
///
/// if let Some(best) = db.search("zox")?.first() {
///     db.select(&best.path)?;
/// }
/// # Ok::<(), dirrank::DirRankError>(())
/// ```
pub struct Database {
    storage: Box<dyn Storage>,
    entries: Vec<Entry>,
    matcher: Matcher,
    aging: AgingPolicy,
    clock: Clock,
    exists: ExistenceCheck,
}

impl Database {
    /// Opens the JSON store named by `config.data_file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the store cannot be
    /// read, or its contents cannot be parsed.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        let storage = JsonStorage::new(config.data_file.clone())?;
        Self::with_storage(Box::new(storage), config)
    }

    /// Opens a database over an arbitrary storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or loading fails.
    pub fn with_storage(storage: Box<dyn Storage>, config: &Config) -> Result<Self> {
        config.validate()?;
        let entries = merge_duplicates(storage.load()?);

        tracing::debug!(count = entries.len(), "database opened");

        Ok(Self {
            storage,
            entries,
            matcher: Matcher::new(config.last_component_rule),
            aging: AgingPolicy {
                max_age: config.max_age,
                prune_missing: config.prune_missing,
                prune_after_days: config.prune_after_days,
            },
            clock: Box::new(system_clock),
            exists: Box::new(paths::path_exists),
        })
    }

    /// Replaces the time source.
    #[must_use]
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> i64 + Send + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the check used to hide and prune paths missing on disk.
    ///
    /// The check should answer `false` whenever existence cannot be determined.
    #[must_use]
    pub fn with_existence_check<F>(mut self, exists: F) -> Self
    where
        F: Fn(&str) -> bool + Send + 'static,
    {
        self.exists = Box::new(exists);
        self
    }

    /// Current time in Unix seconds, as seen by ranking and aging.
    #[must_use]
    pub fn now(&self) -> i64 {
        (self.clock)()
    }

    /// Records a visit to `path`, creating the entry if it is new.
    ///
    /// The path is made absolute but does not need to exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be made absolute or the store cannot
    /// be written. On error nothing is committed.
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = paths::absolutize(path)?;
        let _span = tracing::debug_span!("db_add", path = %path).entered();
        let now = self.now();

        self.commit(|entries| {
            if let Some(entry) = entries.iter_mut().find(|e| e.is_path(&path)) {
                entry.visit(now);
                tracing::debug!(score = entry.score, "updated existing entry");
            } else {
                tracing::debug!("inserting new entry");
                entries.push(Entry::new(path.clone(), now));
            }
        })
    }

    /// Reinforces an existing entry. Never creates one.
    ///
    /// Returns `false` when no entry matches `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be made absolute or the store cannot
    /// be written.
    pub fn select(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = paths::absolutize(path)?;
        let _span = tracing::debug_span!("db_select", path = %path).entered();
        let now = self.now();

        let Some(index) = self.entries.iter().position(|e| e.is_path(&path)) else {
            tracing::debug!("no entry to select");
            return Ok(false);
        };

        self.commit(|entries| entries[index].visit(now))?;
        Ok(true)
    }

    /// Returns entries matching `query`, best first, hiding paths absent on disk.
    ///
    /// Runs maintenance first and persists its result if anything changed. Hidden
    /// entries stay in the database untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if maintenance changed the collection and it could not be
    /// written.
    pub fn search(&mut self, query: &str) -> Result<Vec<Entry>> {
        let _span = tracing::debug_span!("db_search", query = %query).entered();
        let now = self.now();

        let mut aged = self.entries.clone();
        if self.aging.apply(&mut aged, now, &self.exists) {
            self.commit(|entries| *entries = aged)?;
        }

        let mut results: Vec<Entry> = self
            .entries
            .iter()
            .filter(|e| self.matcher.matches(e, query))
            .cloned()
            .collect();
        let matched = results.len();

        frecency::sort_by_frecency(&mut results, now);
        results.retain(|e| (self.exists)(&e.path));

        tracing::debug!(matched, shown = results.len(), "search complete");
        Ok(results)
    }

    /// Frecency of `entry` at the database's current time.
    #[must_use]
    pub fn frecency_of(&self, entry: &Entry) -> f64 {
        frecency::calculate_score(entry, self.now())
    }

    /// All tracked entries, in no particular order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies `mutate` and saves; restores the previous collection if saving fails.
    fn commit<F>(&mut self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Entry>),
    {
        let snapshot = self.entries.clone();
        mutate(&mut self.entries);

        if let Err(e) = self.storage.save(&self.entries) {
            tracing::error!(error = %e, "save failed, discarding mutation");
            self.entries = snapshot;
            return Err(e);
        }
        Ok(())
    }
}

/// Folds entries whose paths differ only in case into the first one seen.
fn merge_duplicates(loaded: Vec<Entry>) -> Vec<Entry> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(loaded.len());
    let mut merged: Vec<Entry> = Vec::with_capacity(loaded.len());

    for entry in loaded {
        match index.entry(entry.path.to_lowercase()) {
            MapEntry::Occupied(slot) => {
                tracing::debug!(path = %entry.path, "merging duplicate entry");
                let existing = &mut merged[*slot.get()];
                existing.score += entry.score;
                existing.last_access = existing.last_access.max(entry.last_access);
            }
            MapEntry::Vacant(slot) => {
                slot.insert(merged.len());
                merged.push(entry);
            }
        }
    }
    merged
}
