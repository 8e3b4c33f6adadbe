//! Integration tests for the database
//!
//! Drives `Database` over a real `JsonStorage` in a temporary directory.

use dirrank::storage::JsonStorage;
use dirrank::{Config, Database, DirRankError, Entry};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

const START: i64 = 1_700_000_000;
const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;

/// Test fixture: a settable clock shared with the database
#[derive(Clone)]
struct TestClock(Arc<AtomicI64>);

impl TestClock {
    fn new() -> Self {
        Self(Arc::new(AtomicI64::new(START)))
    }

    fn set(&self, now: i64) {
        self.0.store(now, Ordering::SeqCst);
    }

    fn advance(&self, secs: i64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }

    fn now(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Test fixture: a workspace holding the store and real directories to track
struct Fixture {
    dir: TempDir,
    clock: TestClock,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
            clock: TestClock::new(),
        }
    }

    fn config(&self) -> Config {
        Config {
            data_file: self.dir.path().join("store").join("db.json"),
            ..Config::default()
        }
    }

    fn open_with(&self, config: &Config) -> Database {
        let clock = self.clock.clone();
        Database::open(config).unwrap().with_clock(move || clock.now())
    }

    fn open(&self) -> Database {
        self.open_with(&self.config())
    }

    /// Creates a directory under the workspace and returns its absolute path.
    fn mkdir(&self, rel: &str) -> String {
        let path = self.dir.path().join("tree").join(rel);
        std::fs::create_dir_all(&path).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn store_path(&self) -> PathBuf {
        self.config().data_file
    }
}

fn paths(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.path.as_str()).collect()
}

fn total_score(entries: &[Entry]) -> f64 {
    entries.iter().map(|e| e.score).sum()
}

mod add_tests {
    use super::*;

    #[test]
    fn test_new_path_starts_at_score_one() {
        let fx = Fixture::new();
        let mut db = fx.open();
        let path = fx.mkdir("alpha");

        db.add(&path).unwrap();

        let results = db.search(&path).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, path);
        assert_eq!(results[0].score, 1.0);
        assert_eq!(results[0].last_access, START);
    }

    #[test]
    fn test_repeated_adds_accumulate() {
        let fx = Fixture::new();
        let mut db = fx.open();

        for _ in 0..5 {
            db.add("/srv/app").unwrap();
            fx.clock.advance(10);
        }

        assert_eq!(db.len(), 1);
        assert_eq!(db.entries()[0].score, 5.0);
        assert_eq!(db.entries()[0].last_access, START + 40);
    }

    #[test]
    fn test_paths_are_case_insensitive() {
        let fx = Fixture::new();
        let mut db = fx.open();

        db.add("/Foo/Bar").unwrap();
        db.add("/foo/bar").unwrap();

        assert_eq!(db.len(), 1);
        assert_eq!(db.entries()[0].path, "/Foo/Bar");
        assert_eq!(db.entries()[0].score, 2.0);
    }

    #[test]
    fn test_paths_are_normalized() {
        let fx = Fixture::new();
        let mut db = fx.open();

        db.add("/srv/./app/../app/").unwrap();
        db.add("/srv/app").unwrap();

        assert_eq!(paths(db.entries()), ["/srv/app"]);
        assert_eq!(db.entries()[0].score, 2.0);
    }

    #[test]
    fn test_nonexistent_paths_are_tracked() {
        let fx = Fixture::new();
        let mut db = fx.open();

        db.add("/no/such/directory/anywhere").unwrap();

        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_every_add_is_persisted() {
        let fx = Fixture::new();
        let mut db = fx.open();

        db.add("/srv/one").unwrap();
        db.add("/srv/two").unwrap();

        let reopened = fx.open();
        assert_eq!(reopened.entries(), db.entries());
    }
}

mod select_tests {
    use super::*;

    #[test]
    fn test_select_reinforces_existing_entry() {
        let fx = Fixture::new();
        let mut db = fx.open();
        db.add("/srv/app").unwrap();
        fx.clock.advance(HOUR);

        assert!(db.select("/SRV/App").unwrap());

        assert_eq!(db.entries()[0].score, 2.0);
        assert_eq!(db.entries()[0].last_access, START + HOUR);
        assert_eq!(fx.open().entries()[0].score, 2.0);
    }

    #[test]
    fn test_select_never_creates() {
        let fx = Fixture::new();
        let mut db = fx.open();

        assert!(!db.select("/srv/unknown").unwrap());

        assert!(db.is_empty());
        assert!(!fx.store_path().exists());
    }
}

mod search_tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_everything_present() {
        let fx = Fixture::new();
        let mut db = fx.open();
        let a = fx.mkdir("a");
        let b = fx.mkdir("b");
        db.add(&a).unwrap();
        db.add(&b).unwrap();

        let mut found = paths(&db.search("").unwrap())
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        found.sort();

        assert_eq!(found, [a, b]);
    }

    #[test]
    fn test_results_ranked_by_frecency() {
        let fx = Fixture::new();
        let mut db = fx.open();
        let old = fx.mkdir("work/old-heavy");
        let fresh = fx.mkdir("work/fresh-light");

        // 10 visits two weeks ago: frecency 10 / 4 = 2.5
        for _ in 0..10 {
            db.add(&old).unwrap();
        }
        fx.clock.advance(14 * DAY);
        // 1 visit just now: frecency 1 * 4 = 4
        db.add(&fresh).unwrap();

        let results = db.search("work -").unwrap();
        assert_eq!(paths(&results), [fresh.as_str(), old.as_str()]);
    }

    #[test]
    fn test_ties_break_on_recency_then_path() {
        let fx = Fixture::new();
        let mut db = fx.open();
        let b = fx.mkdir("tie/b");
        let a = fx.mkdir("tie/a");
        let c = fx.mkdir("tie/c");

        db.add(&b).unwrap();
        db.add(&a).unwrap();
        fx.clock.advance(60);
        db.add(&c).unwrap();

        let results = db.search("").unwrap();
        assert_eq!(paths(&results), [c.as_str(), a.as_str(), b.as_str()]);
    }

    #[test]
    fn test_query_terms_in_order() {
        let fx = Fixture::new();
        let mut db = fx.open();
        let zoxide = fx.mkdir("user/projects/zoxide");
        db.add(&zoxide).unwrap();

        assert_eq!(paths(&db.search("user zox").unwrap()), [zoxide.as_str()]);
        assert!(db.search("zox user").unwrap().is_empty());
        assert!(db.search("projects xyz").unwrap().is_empty());
    }

    #[test]
    fn test_last_component_rule_is_configurable() {
        let fx = Fixture::new();
        let config = Config {
            last_component_rule: false,
            ..fx.config()
        };
        let mut db = fx.open_with(&config);
        let zoxide = fx.mkdir("user/projects/zoxide");
        db.add(&zoxide).unwrap();

        assert_eq!(paths(&db.search("projects").unwrap()), [zoxide.as_str()]);
    }

    #[test]
    fn test_displayed_values_use_database_clock() {
        let fx = Fixture::new();
        let mut db = fx.open();
        let app = fx.mkdir("app");
        db.add(&app).unwrap();
        fx.clock.advance(2 * HOUR);

        let results = db.search("app").unwrap();

        assert_eq!(db.now(), START + 2 * HOUR);
        assert_eq!(db.frecency_of(&results[0]), 2.0);
        assert_eq!(results[0].time_ago(db.now()), "2h ago");
    }

    #[test]
    fn test_missing_paths_hidden_but_kept() {
        let fx = Fixture::new();
        let mut db = fx.open();
        let mount = fx.mkdir("media/usb");
        db.add(&mount).unwrap();
        db.add(&mount).unwrap();

        std::fs::remove_dir(&mount).unwrap();
        assert!(db.search("usb").unwrap().is_empty());
        assert_eq!(db.len(), 1);
        assert_eq!(db.entries()[0].score, 2.0);

        std::fs::create_dir_all(&mount).unwrap();
        let results = db.search("usb").unwrap();
        assert_eq!(paths(&results), [mount.as_str()]);
        assert_eq!(results[0].score, 2.0);
    }
}

mod maintenance_tests {
    use super::*;

    #[test]
    fn test_aging_compresses_scores() {
        let fx = Fixture::new();
        let config = Config {
            max_age: 100.0,
            ..fx.config()
        };
        let mut db = fx.open_with(&config);

        for name in ["/a", "/b", "/c", "/d"] {
            for _ in 0..50 {
                db.add(name).unwrap();
            }
        }
        assert_eq!(total_score(db.entries()), 200.0);

        db.search("").unwrap();

        assert!(total_score(db.entries()) <= 90.0);
        assert!(db.entries().iter().all(|e| e.score >= 1.0));
        assert_eq!(db.len(), 4);

        let reopened = fx.open_with(&config);
        assert_eq!(reopened.entries(), db.entries());
    }

    #[test]
    fn test_aging_skipped_below_ceiling() {
        let fx = Fixture::new();
        let mut db = fx.open();
        db.add("/a").unwrap();
        db.add("/a").unwrap();

        db.search("").unwrap();

        assert_eq!(db.entries()[0].score, 2.0);
    }

    #[test]
    fn test_missing_entries_survive_by_default() {
        let fx = Fixture::new();
        let mut db = fx.open();
        db.add("/gone/for/good").unwrap();
        fx.clock.advance(365 * DAY);

        db.search("").unwrap();

        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_pruning_removes_stale_missing_entries() {
        let fx = Fixture::new();
        let config = Config {
            prune_missing: true,
            ..fx.config()
        };
        let mut db = fx.open_with(&config);
        let present = fx.mkdir("present");

        db.add("/gone/stale").unwrap();
        db.add(&present).unwrap();
        fx.clock.advance(100 * DAY);
        db.add("/gone/recent").unwrap();
        fx.clock.advance(DAY);

        db.search("").unwrap();

        let mut kept = paths(db.entries());
        kept.sort_unstable();
        assert_eq!(kept, ["/gone/recent", present.as_str()]);
        assert_eq!(fx.open_with(&config).len(), 2);
    }

    #[test]
    fn test_pruning_respects_window() {
        let fx = Fixture::new();
        let config = Config {
            prune_missing: true,
            prune_after_days: 7,
            ..fx.config()
        };
        let mut db = fx.open_with(&config);
        db.add("/gone").unwrap();

        fx.clock.set(START + 6 * DAY);
        db.search("").unwrap();
        assert_eq!(db.len(), 1);

        fx.clock.set(START + 8 * DAY);
        db.search("").unwrap();
        assert!(db.is_empty());
    }
}

mod persistence_tests {
    use super::*;
    use dirrank::storage::Storage;

    #[test]
    fn test_roundtrip_preserves_entries() {
        let fx = Fixture::new();
        let mut db = fx.open();
        db.add("/one").unwrap();
        fx.clock.advance(HOUR);
        db.add("/two").unwrap();
        db.add("/two").unwrap();

        let storage = JsonStorage::new(fx.store_path()).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, db.entries());
        assert_eq!(fx.open().entries(), db.entries());
    }

    #[test]
    fn test_store_is_a_json_array_of_records() {
        let fx = Fixture::new();
        let mut db = fx.open();
        db.add("/srv").unwrap();

        let raw = std::fs::read_to_string(fx.store_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{ "path": "/srv", "score": 1.0, "last_access": START }])
        );
    }

    #[test]
    fn test_corrupt_store_fails_open() {
        let fx = Fixture::new();
        let store = fx.store_path();
        std::fs::create_dir_all(store.parent().unwrap()).unwrap();
        std::fs::write(&store, "[{\"path\": 3}").unwrap();

        let result = Database::open(&fx.config());

        assert!(matches!(result, Err(DirRankError::Format(_))));
        assert_eq!(std::fs::read_to_string(&store).unwrap(), "[{\"path\": 3}");
    }

    #[test]
    fn test_unreadable_store_is_an_io_error() {
        let fx = Fixture::new();
        // A directory sitting where the store file should be cannot be read.
        let store = fx.store_path();
        std::fs::create_dir_all(&store).unwrap();

        let result = Database::with_storage(
            Box::new(JsonStorage::new(store).unwrap()),
            &Config::default(),
        );

        assert!(matches!(result, Err(DirRankError::Io(_))));
    }

    #[test]
    fn test_store_with_invalid_score_fails_open() {
        let fx = Fixture::new();
        let store = fx.store_path();
        std::fs::create_dir_all(store.parent().unwrap()).unwrap();
        let contents = r#"[{"path": "/tmp", "score": -3, "last_access": 0}]"#;
        std::fs::write(&store, contents).unwrap();

        let result = Database::open(&fx.config());

        assert!(matches!(result, Err(DirRankError::Format(_))));
        assert_eq!(std::fs::read_to_string(&store).unwrap(), contents);
    }

    #[test]
    fn test_store_path_parent_created() {
        let fx = Fixture::new();
        let mut db = fx.open();
        db.add("/x").unwrap();
        assert!(Path::new(&fx.store_path()).is_file());
    }
}
