//! Export/import round trips between stores with different tag ids

mod common;

use common::{create_id, init_store, run_json, run_ok, seed_bank, tagdraw};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_round_trip_keeps_tag_names() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source");
    let target = dir.path().join("target");
    let pack = dir.path().join("pack.json");

    let (parent, _, _, _) = seed_bank(&source);
    create_id(
        &source,
        &[
            "question", "add", "Both", "--category", &parent.to_string(), "--tag", "A",
            "--tag", "B",
        ],
    );
    create_id(
        &source,
        &["question", "add", "Excluded", "--category", &parent.to_string(), "--tag", "C"],
    );
    create_id(
        &source,
        &[
            "selector", "add", "--category", &parent.to_string(), "--include", "A",
            "--include", "B", "--exclude", "C",
        ],
    );
    run_ok(&source, &["export", "--output", pack.to_str().unwrap()]);

    // Different tag ids on the target: tags exist there already, in another order
    init_store(&target);
    let other = create_id(&target, &["category", "add", "Elsewhere"]);
    create_id(
        &target,
        &[
            "question", "add", "Local", "--category", &other.to_string(), "--tag", "zz",
            "--tag", "C", "--tag", "B",
        ],
    );

    let summary = run_json(&target, &["import", pack.to_str().unwrap()]);
    assert_eq!(summary["selectors"], 1);
    assert_eq!(summary["categories"], 2);

    let selectors = run_json(&target, &["selector", "list"]);
    let imported = &selectors[0];
    assert_eq!(imported["include_tags"], serde_json::json!(["A", "B"]));
    assert_eq!(imported["exclude_tags"], serde_json::json!(["C"]));

    // The imported selector draws the imported "Both" question
    let id = imported["id"].as_i64().unwrap().to_string();
    let pool = run_json(&target, &["pool", &id]);
    assert_eq!(pool["size"], 1);
}

#[test]
fn test_import_legacy_pack_and_fill_placeholder() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    let pack = dir.path().join("legacy.json");
    init_store(&target);

    std::fs::write(
        &pack,
        r#"{
            "version": "1",
            "categories": [
                { "id": 11, "name": "Child", "parent_id": 10 },
                { "id": 10, "name": "Parent" }
            ],
            "questions": [
                { "id": 100, "category_id": 11, "name": "Q1", "kind": "multichoice", "tags": ["easy", "algebra"] },
                { "id": 101, "category_id": 10, "name": "Q2", "kind": "multichoice", "tags": ["hard"] },
                { "id": 200, "category_id": 10, "name": "", "kind": "randomtag", "text": "", "parent_id": 200 }
            ],
            "selectors": [
                {
                    "question_id": 200,
                    "category_id": 10,
                    "include_subcategories": true,
                    "intags": "7,,x",
                    "outtags": "",
                    "used_tags": [ { "id": 7, "name": "algebra" } ]
                }
            ]
        }"#,
    )
    .unwrap();

    let summary = run_json(&target, &["import", pack.to_str().unwrap()]);
    assert_eq!(summary["placeholders_fixed"], 1);

    let selectors = run_json(&target, &["selector", "list"]);
    assert_eq!(selectors[0]["include_tags"], serde_json::json!(["algebra"]));
    assert_eq!(selectors[0]["include_subcategories"], true);

    let id = selectors[0]["id"].as_i64().unwrap().to_string();
    let pick = run_json(&target, &["pick", &id, "--seed", "3"]);
    assert_eq!(pick["name"], "Q1 selected by Random with Tags(algebra)");
}

#[test]
fn test_import_rejects_unknown_version() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    let pack = dir.path().join("future.json");
    init_store(&target);
    std::fs::write(&pack, r#"{ "version": "9" }"#).unwrap();

    tagdraw()
        .arg("--store")
        .arg(&target)
        .arg("import")
        .arg(&pack)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pack version"));
}

#[test]
fn test_export_to_stdout_is_json() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source");
    seed_bank(&source);

    let stdout = run_ok(&source, &["export"]);
    let pack: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(pack["version"], "1");
    assert_eq!(pack["categories"].as_array().unwrap().len(), 2);
    assert_eq!(pack["questions"].as_array().unwrap().len(), 2);
}

fn write_pack(path: &std::path::Path, selector: &str) {
    std::fs::write(
        path,
        format!(
            r#"{{
                "version": "1",
                "categories": [ {{ "id": 10, "name": "Parent" }} ],
                "questions": [
                    {{ "id": 100, "category_id": 10, "name": "Q1", "kind": "multichoice", "tags": ["easy"] }},
                    {{ "id": 200, "category_id": 10, "name": "", "kind": "randomtag", "text": "0", "parent_id": 200 }}
                ],
                "selectors": [ {selector} ]
            }}"#
        ),
    )
    .unwrap();
}

fn assert_store_empty(store: &std::path::Path) {
    assert_eq!(run_json(store, &["category", "list"]), serde_json::json!([]));
    assert_eq!(run_json(store, &["question", "list"]), serde_json::json!([]));
    assert_eq!(run_json(store, &["selector", "list"]), serde_json::json!([]));
    assert_eq!(run_json(store, &["tags"]), serde_json::json!([]));
}

#[test]
fn test_malformed_selector_record_imports_nothing() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    let pack = dir.path().join("bad_mode.json");
    init_store(&target);
    write_pack(
        &pack,
        r#"{ "question_id": 200, "category_id": 10, "include_mode": 7, "associations": [] }"#,
    );

    for _ in 0..2 {
        tagdraw()
            .arg("--store")
            .arg(&target)
            .arg("import")
            .arg(&pack)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("include mode code"));
        assert_store_empty(&target);
    }
}

#[test]
fn test_failed_import_rolls_back_and_retry_does_not_duplicate() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    let pack = dir.path().join("pack.json");
    init_store(&target);

    // The selector points at a question the pack does not contain
    write_pack(
        &pack,
        r#"{ "question_id": 999, "category_id": 10,
             "associations": [ { "tag_id": 1, "included": true, "name": "easy" } ] }"#,
    );
    tagdraw()
        .arg("--store")
        .arg(&target)
        .arg("import")
        .arg(&pack)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("question mapping for not found: 999"));
    assert_store_empty(&target);

    write_pack(
        &pack,
        r#"{ "question_id": 200, "category_id": 10,
             "associations": [ { "tag_id": 1, "included": true, "name": "easy" } ] }"#,
    );
    let summary = run_json(&target, &["import", pack.to_str().unwrap()]);
    assert_eq!(summary["questions"], 2);

    assert_eq!(run_json(&target, &["category", "list"]).as_array().unwrap().len(), 1);
    assert_eq!(run_json(&target, &["question", "list"]).as_array().unwrap().len(), 2);
    let selectors = run_json(&target, &["selector", "list"]);
    assert_eq!(selectors.as_array().unwrap().len(), 1);
    assert_eq!(selectors[0]["include_tags"], serde_json::json!(["easy"]));
}

#[test]
fn test_nested_sub_questions_in_any_order() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    let pack = dir.path().join("nested.json");
    init_store(&target);

    std::fs::write(
        &pack,
        r#"{
            "version": "1",
            "categories": [ { "id": 10, "name": "Parent" } ],
            "questions": [
                { "id": 302, "category_id": 10, "name": "Grandchild", "kind": "shortanswer", "parent_id": 301 },
                { "id": 301, "category_id": 10, "name": "Child", "kind": "shortanswer", "parent_id": 300 },
                { "id": 300, "category_id": 10, "name": "Top", "kind": "multichoice" }
            ]
        }"#,
    )
    .unwrap();

    let summary = run_json(&target, &["import", pack.to_str().unwrap()]);
    assert_eq!(summary["questions"], 3);

    let questions = run_json(&target, &["question", "list"]);
    let by_name = |name: &str| {
        questions
            .as_array()
            .unwrap()
            .iter()
            .find(|q| q["name"] == name)
            .cloned()
            .unwrap()
    };
    let top = by_name("Top");
    let child = by_name("Child");
    let grandchild = by_name("Grandchild");
    assert_eq!(top["parent_id"], 0);
    assert_eq!(child["parent_id"], top["id"]);
    assert_eq!(grandchild["parent_id"], child["id"]);
}

#[test]
fn test_sub_question_with_missing_parent_imports_nothing() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    let pack = dir.path().join("orphan.json");
    init_store(&target);

    std::fs::write(
        &pack,
        r#"{
            "version": "1",
            "categories": [ { "id": 10, "name": "Parent" } ],
            "questions": [
                { "id": 300, "category_id": 10, "name": "Top", "kind": "multichoice" },
                { "id": 301, "category_id": 10, "name": "Orphan", "kind": "shortanswer", "parent_id": 555 }
            ]
        }"#,
    )
    .unwrap();

    tagdraw()
        .arg("--store")
        .arg(&target)
        .arg("import")
        .arg(&pack)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("parent question not found: 555"));
    assert_store_empty(&target);
}
