use super::*;
use tempfile::tempdir;

#[test]
fn test_database_open_creates_tables() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    let count: i64 = db
        .conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
            [],
            |row: &rusqlite::Row| row.get(0),
        )
        .unwrap();

    assert!(count >= 7);
    assert!(dir.path().join(DB_FILE).exists());
}

#[test]
fn test_reopen_keeps_data() {
    let dir = tempdir().unwrap();
    {
        let db = Database::open(dir.path()).unwrap();
        db.create_category("Algebra", None).unwrap();
    }
    let db = Database::open(dir.path()).unwrap();
    assert_eq!(db.categories().unwrap().len(), 1);
    assert_eq!(db.get_schema_version().unwrap(), CURRENT_SCHEMA_VERSION as i64);
}

#[test]
fn test_foreign_keys_enabled() {
    let db = Database::open_in_memory().unwrap();
    let enabled: i64 = db
        .conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}
