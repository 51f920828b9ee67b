use super::*;
use crate::bank::SelectorStore;
use crate::error::{Result, TagdrawError};
use crate::kinds::SELECTOR_KIND;
use crate::model::SelectorConfig;

#[test]
fn test_savepoint_keeps_writes_on_success() {
    let (db, root, _, _) = seeded();

    let id = db
        .with_savepoint("job", |db| {
            db.create_question(&NewQuestion::new(root, "kept", "multichoice"), &tags(&["a"]))
        })
        .unwrap();

    assert_eq!(db.question(id).unwrap().unwrap().tags, vec!["a"]);
}

#[test]
fn test_savepoint_rolls_back_nested_writes() {
    let (db, root, _, _) = seeded();

    let result: Result<()> = db.with_savepoint("job", |db| {
        db.create_category("Temporary", Some(root))?;
        db.create_question(&NewQuestion::new(root, "lost", "multichoice"), &tags(&["new"]))?;
        let selector = db.create_selector_question(root, false)?;
        db.save_selector(selector, &SelectorConfig::new(root))?;
        Err(TagdrawError::Other("abort".to_string()))
    });

    assert!(result.is_err());
    assert!(db.questions().unwrap().is_empty());
    assert_eq!(db.categories().unwrap().len(), 3);
    assert_eq!(db.get_tag_count().unwrap(), 0);
    assert_eq!(db.get_selector_count().unwrap(), 0);

    // The connection is usable afterwards
    db.create_question(&NewQuestion::new(root, "after", "multichoice"), &[])
        .unwrap();
    assert_eq!(db.questions().unwrap().len(), 1);
}

#[test]
fn test_failed_selector_question_leaves_no_row() {
    let db = Database::open_in_memory().unwrap();

    let err = db
        .create_selector_question_with(&NewQuestion::new(404, "", SELECTOR_KIND))
        .unwrap_err();

    assert!(matches!(err, TagdrawError::NotFound { .. }));
    assert!(db.questions().unwrap().is_empty());
}

#[test]
fn test_selector_question_is_linked_inside_its_savepoint() {
    let (db, root, _, _) = seeded();

    let result: Result<()> = db.with_savepoint("job", |db| {
        let id = db.create_selector_question(root, true)?;
        let stored = db.question(id)?.unwrap();
        assert_eq!(stored.parent_id, id);
        Err(TagdrawError::Other("abort".to_string()))
    });

    assert!(result.is_err());
    assert!(db.questions().unwrap().is_empty());
}
