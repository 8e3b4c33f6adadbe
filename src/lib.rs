//! dirrank: a frecency-ranked database of visited directories.
//!
//! dirrank remembers which directories you visit and how often, so a short query
//! like `proj zox` can resolve to `/home/user/projects/zoxide`. It provides:
//! - Case-insensitive tracking of visited paths with a visit score
//! - Bucketed frecency ranking (frequency weighted by recency)
//! - In-order substring matching biased toward the leaf directory name
//! - Automatic score aging so the database stays small
//! - Persistent state in a single JSON file, rewritten atomically

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI front end (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                │                          │
//! ┌─────────────────────────────┐  ┌────────────────────┐
//! │  Database (database.rs)     │◄─│ Populator          │
//! │  - add / select / search    │  │ (populate.rs)      │
//! └─────────────────────────────┘  └────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌────────────────────────────────┐
//! │ Domain        │   │ Storage Layer (storage/)       │
//! │ (domain/)     │   │ - JSON I/O                     │
//! │ - Entry       │   │ - Frecency                     │
//! │ - Matcher     │   │ - Aging / pruning              │
//! │ - Errors      │   │                                │
//! └───────────────┘   └────────────────────────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure (infrastructure/) + Observability   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`database`]: The orchestrator owning the entry collection
//! - [`domain`]: Core domain types (Entry, Matcher, errors)
//! - [`infrastructure`]: Platform paths and filesystem checks
//! - [`storage`]: JSON persistence, frecency and aging
//! - [`populate`]: Bulk population by directory traversal
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Configuration is read from `~/.config/dirrank/config.toml` (platform config dir)
//! when present. Every key is optional:
//!
//! ```toml
//! data_file = "/home/user/.local/share/dirrank/db.json"
//! max_age = 10000
//! last_component_rule = true
//! prune_missing = false
//! prune_after_days = 90
//! trace_level = "debug"
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use dirrank::{Config, Database};
//!
//! let config = Config::load(None)?;
//! let mut db = Database::open(&config)?;
//!
//! db.add("/home/user/projects/zoxide")?;
//! for entry in db.search("proj zox")? {
//!     println!("{} ({})", entry.path, db.frecency_of(&entry));
//! }
//! # Ok::<(), dirrank::DirRankError>(())
//! ```

pub mod database;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod populate;
pub mod storage;

pub use database::Database;
pub use domain::{DirRankError, Entry, Matcher, Result};
pub use populate::Populator;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use storage::aging::{DEFAULT_MAX_AGE, DEFAULT_PRUNE_AFTER_DAYS};

/// Database configuration.
///
/// Passed explicitly into [`Database::open`]; nothing in the library reads
/// configuration from process-global state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON file holding the entry collection.
    ///
    /// Default: `<data dir>/dirrank/db.json`
    pub data_file: PathBuf,

    /// Ceiling for the summed score before aging kicks in. Default: `10000`
    pub max_age: f64,

    /// Require the last query term to match the basename. Default: `true`
    pub last_component_rule: bool,

    /// Remove entries that are missing on disk and stale. Default: `false`
    ///
    /// Leave this off if you keep history for removable or network drives.
    pub prune_missing: bool,

    /// Days a missing entry must go unvisited before pruning. Default: `90`
    pub prune_after_days: u32,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. `RUST_LOG` wins when set.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: infrastructure::get_data_dir().join("db.json"),
            max_age: DEFAULT_MAX_AGE,
            last_component_rule: true,
            prune_missing: false,
            prune_after_days: DEFAULT_PRUNE_AFTER_DAYS,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a configuration error
    /// if it is not valid TOML or holds invalid values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)
            .map_err(|e| DirRankError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = ?path, "loaded configuration file");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the string is not valid TOML or holds
    /// invalid values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dirrank::Config;
    ///
    /// let config = Config::from_toml("max_age = 500\nprune_missing = true").unwrap();
    /// assert_eq!(config.max_age, 500.0);
    /// assert!(config.prune_missing);
    /// assert!(config.last_component_rule);
    /// ```
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| DirRankError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `explicit` if given, else the default config file if it exists,
    /// else the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match infrastructure::default_config_file() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                tracing::debug!("no configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Checks that numeric settings are usable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `max_age` is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if !self.max_age.is_finite() || self.max_age <= 0.0 {
            return Err(DirRankError::Config(format!(
                "max_age must be a positive number, got {}",
                self.max_age
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_toml(
            r#"
            data_file = "/tmp/db.json"
            max_age = 2000
            last_component_rule = false
            prune_missing = true
            prune_after_days = 30
            trace_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/db.json"));
        assert_eq!(config.max_age, 2000.0);
        assert!(!config.last_component_rule);
        assert!(config.prune_missing);
        assert_eq!(config.prune_after_days, 30);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_non_positive_max_age() {
        assert!(matches!(
            Config::from_toml("max_age = -5"),
            Err(DirRankError::Config(_))
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Config::from_toml("max_agee = 5").is_err());
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "prune_after_days = 7\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.prune_after_days, 7);
    }
}
