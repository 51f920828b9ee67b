use std::collections::BTreeSet;

use super::*;
use crate::bank::{SelectorStore, TagStore};
use crate::error::TagdrawError;
use crate::model::{IncludeMode, SelectorConfig};

#[test]
fn test_save_and_load_selector() {
    let (db, root, _, _) = seeded();
    let easy = db.find_or_create_tag_by_name("easy").unwrap();
    let hard = db.find_or_create_tag_by_name("hard").unwrap();
    let id = db.create_selector_question(root, true).unwrap();

    let config = SelectorConfig::new(root)
        .with_subcategories(true)
        .with_mode(IncludeMode::All)
        .with_include_tags([easy])
        .with_exclude_tags([hard]);
    let rows = db.save_selector(id, &config).unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.id > 0 && r.selector_id == id));
    assert_eq!(db.load_selector(id).unwrap(), Some(config));
    assert_eq!(
        db.question(id).unwrap().unwrap().name,
        "Random with Tags(easy)"
    );
}

#[test]
fn test_save_replaces_rows_wholesale() {
    let (db, root, _, _) = seeded();
    let a = db.find_or_create_tag_by_name("a").unwrap();
    let b = db.find_or_create_tag_by_name("b").unwrap();
    let c = db.find_or_create_tag_by_name("c").unwrap();
    let id = db.create_selector_question(root, false).unwrap();

    db.save_selector(id, &SelectorConfig::new(root).with_include_tags([a, b]))
        .unwrap();
    let rows = db
        .save_selector(id, &SelectorConfig::new(root).with_exclude_tags([c]))
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tag_id, c);
    assert!(!rows[0].included);
    assert_eq!(db.get_selector_count().unwrap(), 1);
}

#[test]
fn test_overlapping_tag_is_stored_both_ways() {
    let (db, root, _, _) = seeded();
    let t = db.find_or_create_tag_by_name("both").unwrap();
    let id = db.create_selector_question(root, false).unwrap();

    let config = SelectorConfig::new(root)
        .with_include_tags([t])
        .with_exclude_tags([t]);
    assert_eq!(db.save_selector(id, &config).unwrap().len(), 2);
    assert_eq!(db.load_selector(id).unwrap(), Some(config));
}

#[test]
fn test_save_requires_selector_question() {
    let (db, root, _, _) = seeded();
    let plain = db
        .create_question(&NewQuestion::new(root, "Q", "multichoice"), &[])
        .unwrap();

    let err = db.save_selector(999, &SelectorConfig::new(root)).unwrap_err();
    assert!(matches!(err, TagdrawError::SelectorNotFound { id: 999 }));

    let err = db.save_selector(plain, &SelectorConfig::new(root)).unwrap_err();
    assert!(matches!(err, TagdrawError::InvalidValue { .. }));
}

#[test]
fn test_delete_cascades_to_tag_rows() {
    let (db, root, _, _) = seeded();
    let t = db.find_or_create_tag_by_name("t").unwrap();
    let id = db.create_selector_question(root, false).unwrap();
    db.save_selector(id, &SelectorConfig::new(root).with_include_tags([t]))
        .unwrap();

    assert!(db.delete_selector(id).unwrap());
    assert!(!db.delete_selector(id).unwrap());
    assert!(db.load_selector(id).unwrap().is_none());
    assert!(db.tag_associations(id).unwrap().is_empty());
    assert!(db.selector_ids().unwrap().is_empty());
}

#[test]
fn test_fill_blank_placeholders_only_touches_blank_selectors() {
    let (db, root, _, _) = seeded();
    let mut blank = NewQuestion::new(root, "", "randomtag");
    blank.text = String::new();
    let blank_id = db.create_selector_question_with(&blank).unwrap();
    let set_id = db.create_selector_question(root, true).unwrap();
    let plain = db
        .create_question(&NewQuestion::new(root, "Q", "essay"), &[])
        .unwrap();

    let changed = db
        .fill_blank_placeholders(&BTreeSet::from([blank_id, set_id, plain]), "0")
        .unwrap();

    assert_eq!(changed, 1);
    assert_eq!(db.question(blank_id).unwrap().unwrap().text, "0");
    assert_eq!(db.question(set_id).unwrap().unwrap().text, "1");
    assert_eq!(db.question(plain).unwrap().unwrap().text, "");
}
