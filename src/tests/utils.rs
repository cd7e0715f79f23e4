use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// A test database backed by a temp file. The file goes away when the
/// handle is dropped.
pub struct TestDb {
    db: Database,
    path: PathBuf,
}

impl Deref for TestDb {
    type Target = Database;

    fn deref(&self) -> &Database {
        &self.db
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
        let _ = std::fs::remove_file(self.path.with_extension("sqlite-journal"));
    }
}

/// Initialize a fresh test DB using the production schema
pub fn init_test_db() -> TestDb {
    let path = std::env::temp_dir().join(format!(
        "lead_tracker_test_{}_{}_{}.sqlite",
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        NEXT_DB.fetch_add(1, Ordering::Relaxed)
    ));
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    TestDb { db, path }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        sold_statuses: vec!["Satıldı".to_string()],
        ..AppConfig::default()
    }
}

#[test]
fn test_db_file_is_removed_on_drop() {
    let db = init_test_db();
    let path = db.path.clone();
    assert!(path.exists());

    drop(db);
    assert!(!path.exists());
}
