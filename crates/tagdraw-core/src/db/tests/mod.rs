use super::*;

mod open;
mod savepoint;
mod selectors;

/// Category 10 with one child (11), and a third unrelated category
pub(super) fn seeded() -> (Database, i64, i64, i64) {
    let db = Database::open_in_memory().unwrap();
    let root = db.create_category("Algebra", None).unwrap();
    let child = db.create_category("Quadratics", Some(root)).unwrap();
    let other = db.create_category("Geometry", None).unwrap();
    (db, root, child, other)
}

pub(super) fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
