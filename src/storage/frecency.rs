//! Frecency score calculation for ranking entries.
//!
//! Implements a "frecency" (frequency + recency) ranking to order entries based on
//! both how often they are visited and how recently. The score is scaled by a
//! step function of the time since the last visit rather than a continuous decay,
//! so a given entry's rank only changes at hour, day and week boundaries.

use std::cmp::Ordering;

use crate::domain::Entry;

/// Number of seconds in one hour.
const HOUR: i64 = 3600;

/// Number of seconds in one day.
const DAY: i64 = 24 * HOUR;

/// Number of seconds in one week.
const WEEK: i64 = 7 * DAY;

/// Calculates the frecency of a score last bumped at `last_access`.
///
/// Let `delta = now - last_access`, clamped to zero:
///
/// ```text
/// delta < 1 hour  → score × 4
/// delta < 1 day   → score × 2
/// delta < 1 week  → score ÷ 2
/// otherwise       → score ÷ 4
/// ```
///
/// Each bucket is closed on its lower edge, so `delta == 3600` falls into the
/// "within a day" bucket.
///
/// # Examples
///
/// ```
/// use dirrank::storage::frecency;
///
/// assert_eq!(frecency(10.0, 0, 3599), 40.0);
/// assert_eq!(frecency(10.0, 0, 3600), 20.0);
/// assert_eq!(frecency(10.0, 0, 604_800), 2.5);
/// ```
#[must_use]
pub fn frecency(score: f64, last_access: i64, now: i64) -> f64 {
    let delta = now.saturating_sub(last_access).max(0);

    if delta < HOUR {
        score * 4.0
    } else if delta < DAY {
        score * 2.0
    } else if delta < WEEK {
        score / 2.0
    } else {
        score / 4.0
    }
}

/// Calculates the frecency of an entry at `now`.
#[must_use]
pub fn calculate_score(entry: &Entry, now: i64) -> f64 {
    frecency(entry.score, entry.last_access, now)
}

/// Sorts entries by frecency, highest first.
///
/// Ties are broken by the most recent `last_access`, then by lower-cased path
/// in ascending order, so the result never depends on the input order.
pub fn sort_by_frecency(entries: &mut [Entry], now: i64) {
    entries.sort_by_cached_key(|entry| RankKey {
        frecency: calculate_score(entry, now),
        last_access: entry.last_access,
        path: entry.path.to_lowercase(),
    });
}

/// Sort key ordering entries from best to worst.
struct RankKey {
    frecency: f64,
    last_access: i64,
    path: String,
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .frecency
            .total_cmp(&self.frecency)
            .then_with(|| other.last_access.cmp(&self.last_access))
            .then_with(|| self.path.cmp(&other.path))
    }
}
