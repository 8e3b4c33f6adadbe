//! Tracked directory entry.
//!
//! This module defines the [`Entry`] type, the single record kind held by the
//! database and written to the backing store. Entries are keyed by path, compared
//! case-insensitively, and carry the two inputs of the frecency model: a score and
//! the time of the most recent visit.

use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Smallest score an entry may hold while it exists.
pub const MIN_SCORE: f64 = 1.0;

/// One tracked directory.
///
/// Field order is also the persisted order: `path`, `score`, `last_access`.
///
/// # Fields
///
/// - `path`: Absolute filesystem path, the natural key
/// - `score`: Visit weight, never below [`MIN_SCORE`] while the entry exists
/// - `last_access`: Unix timestamp of the most recent `add` or `select`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub path: String,
    pub score: f64,
    pub last_access: i64,
}

impl Entry {
    /// Creates a freshly visited entry with a score of 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirrank::Entry;
    ///
    /// let entry = Entry::new("/home/user/code", 1_700_000_000);
    /// assert_eq!(entry.score, 1.0);
    /// assert_eq!(entry.last_access, 1_700_000_000);
    /// ```
    #[must_use]
    pub fn new(path: impl Into<String>, now: i64) -> Self {
        Self {
            path: path.into(),
            score: MIN_SCORE,
            last_access: now,
        }
    }

    /// Returns true if `path` names this entry, ignoring case.
    #[must_use]
    pub fn is_path(&self, path: &str) -> bool {
        self.path.to_lowercase() == path.to_lowercase()
    }

    /// Records a visit: bumps the score by one and moves `last_access` forward.
    ///
    /// `last_access` never moves backwards, even if the clock does.
    pub fn visit(&mut self, now: i64) {
        self.score += 1.0;
        self.last_access = self.last_access.max(now);
    }

    /// Returns a human-readable string describing how long ago the entry was visited.
    ///
    /// The format varies based on the time elapsed:
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago" (e.g., "5m ago")
    /// - Less than 1 day: "Xh ago" (e.g., "3h ago")
    /// - 1 day or more: "Xd ago" (e.g., "7d ago")
    ///
    /// # Examples
    ///
    /// ```
    /// use dirrank::Entry;
    ///
    /// let entry = Entry::new("/tmp", 1_000);
    /// assert_eq!(entry.time_ago(1_030), "just now");
    /// assert_eq!(entry.time_ago(1_300), "5m ago");
    /// ```
    #[must_use]
    pub fn time_ago(&self, now: i64) -> String {
        let diff = now - self.last_access;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}
