//! Score aging and maintenance.
//!
//! Two independent policies keep the database small:
//!
//! - **Aging** (always on): once the summed score exceeds `max_age`, every score is
//!   scaled down so the total lands near 90% of the ceiling. Entries that decay
//!   below [`MIN_SCORE`] are dropped.
//! - **Missing-path pruning** (off by default): entries whose path is gone from the
//!   filesystem *and* that have not been visited within the staleness window are
//!   removed. Unmounted drives look exactly like deleted directories, which is why
//!   this is opt-in.
//!
//! Filesystem existence never feeds into aging.

use crate::domain::{Entry, MIN_SCORE};

/// Fraction of `max_age` the total score is scaled down to.
const AGING_TARGET: f64 = 0.9;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Default aging ceiling.
pub const DEFAULT_MAX_AGE: f64 = 10_000.0;

/// Default staleness window for missing-path pruning, in days.
pub const DEFAULT_PRUNE_AFTER_DAYS: u32 = 90;

/// Maintenance settings applied before every search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgingPolicy {
    /// Ceiling for the summed score of all entries.
    pub max_age: f64,

    /// Remove entries that are missing on disk and stale.
    pub prune_missing: bool,

    /// How long a missing entry must go unvisited before pruning removes it.
    pub prune_after_days: u32,
}

impl Default for AgingPolicy {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            prune_missing: false,
            prune_after_days: DEFAULT_PRUNE_AFTER_DAYS,
        }
    }
}

impl AgingPolicy {
    /// Runs pruning (when enabled) followed by aging. `exists` decides whether a
    /// path is still on disk.
    ///
    /// Returns true if the collection changed and needs to be persisted.
    pub fn apply<F>(&self, entries: &mut Vec<Entry>, now: i64, exists: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        let pruned = if self.prune_missing {
            self.prune_missing_with(entries, now, exists) > 0
        } else {
            false
        };

        let aged = age(entries, self.max_age);
        pruned || aged
    }

    /// Removes entries that fail `exists` and were last visited on or before the
    /// staleness cutoff. Returns the number of removed entries.
    pub fn prune_missing_with<F>(&self, entries: &mut Vec<Entry>, now: i64, exists: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let cutoff = now.saturating_sub(i64::from(self.prune_after_days) * SECONDS_PER_DAY);
        let before = entries.len();

        entries.retain(|entry| entry.last_access > cutoff || exists(&entry.path));

        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, cutoff, "pruned missing entries");
        }
        removed
    }
}

/// Scales scores down once their sum exceeds `max_age`.
///
/// With `total > max_age`, each score becomes `max(1, floor(score / k))` where
/// `k = total / (max_age * 0.9)`. Returns true if anything was rescaled.
pub fn age(entries: &mut Vec<Entry>, max_age: f64) -> bool {
    let total: f64 = entries.iter().map(|e| e.score).sum();
    if total <= max_age {
        return false;
    }

    let k = total / (max_age * AGING_TARGET);
    for entry in entries.iter_mut() {
        entry.score = (entry.score / k).floor().max(MIN_SCORE);
    }
    entries.retain(|e| e.score >= MIN_SCORE);

    tracing::debug!(
        total,
        max_age,
        factor = k,
        remaining = entries.len(),
        "aged entry scores"
    );
    true
}
