use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::Path;

pub fn tagdraw() -> Command {
    let mut cmd = cargo_bin_cmd!("tagdraw");
    cmd.env_remove("TAGDRAW_STORE")
        .env_remove("TAGDRAW_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// `tagdraw --store <store>` with the given args, expecting success; returns stdout
#[allow(dead_code)]
pub fn run_ok(store: &Path, args: &[&str]) -> String {
    let output = tagdraw()
        .arg("--store")
        .arg(store)
        .args(args)
        .output()
        .expect("failed to run tagdraw");
    assert!(
        output.status.success(),
        "tagdraw {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Run with `--format json` and parse stdout
#[allow(dead_code)]
pub fn run_json(store: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--format", "json"];
    full.extend_from_slice(args);
    let stdout = run_ok(store, &full);
    serde_json::from_str(&stdout).expect("stdout is not JSON")
}

/// Run a creating command in JSON mode and return the new id
#[allow(dead_code)]
pub fn create_id(store: &Path, args: &[&str]) -> i64 {
    run_json(store, args)["id"]
        .as_i64()
        .expect("response has no id")
}

/// Initialize a store at `store`
#[allow(dead_code)]
pub fn init_store(store: &Path) {
    tagdraw().arg("--store").arg(store).arg("init").assert().success();
}

/// Parent category with one child and two tagged questions.
/// Returns (parent, child, q_easy_algebra, q_hard).
#[allow(dead_code)]
pub fn seed_bank(store: &Path) -> (i64, i64, i64, i64) {
    init_store(store);
    let parent = create_id(store, &["category", "add", "Algebra"]);
    let child = create_id(
        store,
        &["category", "add", "Quadratics", "--parent", &parent.to_string()],
    );
    let q1 = create_id(
        store,
        &[
            "question", "add", "Roots", "--category", &child.to_string(), "--tag", "easy",
            "--tag", "algebra",
        ],
    );
    let q2 = create_id(
        store,
        &["question", "add", "Proof", "--category", &parent.to_string(), "--tag", "hard"],
    );
    (parent, child, q1, q2)
}
