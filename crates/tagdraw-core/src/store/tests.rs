use super::*;
use crate::kinds::SELECTOR_KIND;
use tempfile::tempdir;

#[test]
fn test_init_creates_config_and_db() {
    let dir = tempdir().unwrap();
    let store = Store::init(dir.path()).unwrap();

    assert_eq!(store.root(), dir.path().join(DEFAULT_STORE_DIR));
    assert!(store.config_path().exists());
    assert!(store.db_path().exists());
    assert!(store.kinds().is_forbidden(SELECTOR_KIND));
}

#[test]
fn test_init_is_idempotent_and_keeps_config() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("bank");
    {
        let store = Store::init_at(&root).unwrap();
        store.db().create_category("Algebra", None).unwrap();
        fs::write(store.config_path(), "[kinds.multichoice]\n").unwrap();
    }

    let store = Store::init_at(&root).unwrap();
    assert_eq!(store.config().kinds.len(), 1);
    assert_eq!(store.db().categories().unwrap().len(), 1);
}

#[test]
fn test_open_missing_store() {
    let dir = tempdir().unwrap();
    let err = Store::open(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, TagdrawError::StoreNotFound { .. }));
}

#[test]
fn test_open_directory_without_database() {
    let dir = tempdir().unwrap();
    let err = Store::open(dir.path()).unwrap_err();
    assert!(matches!(err, TagdrawError::InvalidStore { .. }));
}

#[test]
fn test_discover_from_nested_directory() {
    let dir = tempdir().unwrap();
    Store::init(dir.path()).unwrap();
    let nested = dir.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();

    let store = Store::discover(&nested).unwrap();
    assert_eq!(store.root(), dir.path().join(DEFAULT_STORE_DIR));
}
