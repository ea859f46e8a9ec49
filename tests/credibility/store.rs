use std::fs;

use nepse_sentiment::{CredibilityStore, CredibilityTracker, Direction, NepseError};

#[test]
fn missing_file_is_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredibilityStore::load(&dir.path().join("none.json")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn save_then_load_keeps_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weightage").join("media_weightage.json");

    let mut t = CredibilityTracker::default();
    t.update("example.com", Direction::Positive, Direction::Positive);
    t.update("example.com", Direction::Negative, Direction::Positive);
    t.update("merolagani.com", Direction::Positive, Direction::Positive);
    let store = t.finish();
    store.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n    \"example.com\": {\n        \"correct\": 0,"), "{text}");

    let loaded = CredibilityStore::load(&path).unwrap();
    assert_eq!(loaded, store);
    assert_eq!(loaded.get("example.com").unwrap().incorrect, 1);
    assert_eq!(loaded.get("merolagani.com").unwrap().total_pairs, 0);
}

#[test]
fn weights_are_recomputed_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("w.json");
    fs::write(
        &path,
        r#"{"a.com":{"correct":3,"incorrect":1,"total_pairs":4,"average_weight":0.1},"b.com":{"correct":0,"incorrect":0,"total_pairs":0}}"#,
    )
    .unwrap();

    let store = CredibilityStore::load(&path).unwrap();
    assert_eq!(store.weight("a.com"), 0.75);
    assert_eq!(store.weight("b.com"), 0.0);
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("w.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(CredibilityStore::load(&path), Err(NepseError::Json(_))));
}

#[test]
fn merge_overwrites_per_domain() {
    let mut base = CredibilityTracker::default();
    base.update("a.com", Direction::Positive, Direction::Positive);
    base.update("a.com", Direction::Positive, Direction::Negative);
    base.update("b.com", Direction::Positive, Direction::Positive);
    let mut base = base.finish();

    let mut newer = CredibilityTracker::default();
    newer.update("a.com", Direction::Positive, Direction::Positive);
    newer.update("a.com", Direction::Positive, Direction::Positive);
    base.merge(newer.finish());

    assert_eq!(base.weight("a.com"), 1.0);
    assert!(base.get("b.com").is_some());
    assert_eq!(base.len(), 2);
}

#[test]
fn tracker_continues_from_loaded_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("w.json");
    fs::write(&path, r#"{"example.com":{"correct":1,"incorrect":1,"total_pairs":2}}"#).unwrap();

    let mut t = CredibilityTracker::new(CredibilityStore::load(&path).unwrap());
    t.update("example.com", Direction::Positive, Direction::Positive);
    t.update("example.com", Direction::Negative, Direction::Negative);
    let store = t.finish();
    let stat = store.get("example.com").unwrap();
    assert_eq!((stat.correct, stat.total_pairs), (2, 3));
    assert!((stat.average_weight - 2.0 / 3.0).abs() < 1e-12);
}
