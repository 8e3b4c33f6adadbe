//! Query matching against stored paths.
//!
//! A query is a whitespace-separated list of terms. An entry matches when every
//! term occurs in its lower-cased path, in order, each one found at or after the
//! end of the previous match. With the last-component rule enabled, the final
//! segment of the last term must also occur inside the path's basename.

use crate::domain::Entry;

/// Case-insensitive, in-order substring matcher.
///
/// # Examples
///
/// ```
/// use dirrank::{Entry, Matcher};
///
/// let matcher = Matcher::default();
/// let entry = Entry::new("/home/user/projects/zoxide", 0);
///
/// assert!(matcher.matches(&entry, "user zox"));
/// assert!(!matcher.matches(&entry, "zox user"));
/// assert!(!matcher.matches(&entry, "projects xyz"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    /// Require the last query term to appear in the path's final segment.
    pub last_component_rule: bool,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            last_component_rule: true,
        }
    }
}

impl Matcher {
    #[must_use]
    pub const fn new(last_component_rule: bool) -> Self {
        Self {
            last_component_rule,
        }
    }

    /// Returns true if `entry` satisfies `query`.
    ///
    /// An empty or whitespace-only query matches every entry.
    #[must_use]
    pub fn matches(&self, entry: &Entry, query: &str) -> bool {
        let query = query.to_lowercase();
        let terms: Vec<&str> = query.split_whitespace().collect();
        let Some(last_term) = terms.last() else {
            return true;
        };

        let path = entry.path.to_lowercase();
        let mut cursor = 0;
        for term in &terms {
            match path[cursor..].find(term) {
                Some(offset) => cursor += offset + term.len(),
                None => return false,
            }
        }

        if self.last_component_rule {
            let fragment = last_segment(last_term);
            if !last_segment(&path).contains(fragment) {
                return false;
            }
        }

        true
    }
}

/// Returns the text after the final path separator, or all of `s` if none.
///
/// A trailing separator yields an empty segment, matching `basename` semantics.
fn last_segment(s: &str) -> &str {
    s.rsplit(is_separator).next().unwrap_or(s)
}

fn is_separator(c: char) -> bool {
    c == '/' || c == std::path::MAIN_SEPARATOR
}
