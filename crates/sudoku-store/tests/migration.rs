//! Storage migration behavior against an in-memory backend.

use serde_json::{json, Value};
use sudoku_store::{keys, run_storage_migration, MemoryStorage, Storage};

fn seed(storage: &MemoryStorage, key: &str, value: &Value) {
    storage.set(key, &value.to_string()).unwrap();
}

#[test]
fn full_legacy_set_is_migrated_and_sealed() {
    let storage = MemoryStorage::new();
    seed(
        &storage,
        keys::LEGACY_GAME_STATE,
        &json!({ "difficulty": 2, "timer": 30, "hintsUsed": 1 }),
    );
    seed(&storage, keys::LEGACY_PREFERENCES, &json!({ "difficulty": 3 }));
    seed(
        &storage,
        keys::LEGACY_STATS,
        &json!({ "completed": 2, "totalTime": 200, "bestTime": 90 }),
    );
    storage.set(keys::LEGACY_THEME, "\"dark\"").unwrap();

    let report = run_storage_migration(&storage);
    assert_eq!(report.migrated, 3);
    assert_eq!(report.skipped, 0);
    assert!(!report.already_complete);

    let game: Value = serde_json::from_str(&storage.get(keys::GAME_STATE).unwrap()).unwrap();
    assert_eq!(game["difficulty"], json!(2));
    assert_eq!(game["elapsedSeconds"], json!(30));
    assert_eq!(game["gridConfig"]["size"], json!(9));

    let preferences: Value =
        serde_json::from_str(&storage.get(keys::PREFERENCES).unwrap()).unwrap();
    assert_eq!(preferences["theme"], json!("dark"));
    assert_eq!(preferences["difficulty"], json!(3));
    assert!(preferences["accessibility"].is_object());
    assert!(preferences["progress"].is_object());

    let progress: Value = serde_json::from_str(&storage.get(keys::PROGRESS).unwrap()).unwrap();
    assert_eq!(progress["9"]["puzzlesCompleted"], json!(2));
    assert_eq!(progress["9"]["averageTime"], json!(100));
    assert_eq!(progress["4"]["puzzlesCompleted"], json!(0));

    assert_eq!(storage.get(keys::MIGRATION_COMPLETE).as_deref(), Some("true"));
}

#[test]
fn one_corrupt_key_does_not_abort_the_others() {
    let storage = MemoryStorage::new();
    storage.set(keys::LEGACY_GAME_STATE, "{definitely not json").unwrap();
    seed(&storage, keys::LEGACY_STATS, &json!({ "completed": 1, "totalTime": 50 }));

    let report = run_storage_migration(&storage);
    assert_eq!(report.migrated, 1);
    assert_eq!(report.skipped, 1);

    assert!(storage.get(keys::GAME_STATE).is_none());
    assert!(storage.get(keys::PROGRESS).is_some());
    assert_eq!(storage.get(keys::MIGRATION_COMPLETE).as_deref(), Some("true"));
}

#[test]
fn completed_migration_never_runs_twice() {
    let storage = MemoryStorage::new();
    seed(&storage, keys::LEGACY_STATS, &json!({ "completed": 1 }));

    let first = run_storage_migration(&storage);
    assert_eq!(first.migrated, 1);

    // Newly-appearing legacy data after completion is ignored.
    seed(
        &storage,
        keys::LEGACY_GAME_STATE,
        &json!({ "difficulty": 5 }),
    );
    let second = run_storage_migration(&storage);
    assert!(second.already_complete);
    assert_eq!(second.migrated, 0);
    assert!(storage.get(keys::GAME_STATE).is_none());
}

#[test]
fn empty_storage_still_seals_migration() {
    let storage = MemoryStorage::new();
    let report = run_storage_migration(&storage);
    assert_eq!(report.migrated, 0);
    assert_eq!(report.skipped, 0);
    assert_eq!(storage.get(keys::MIGRATION_COMPLETE).as_deref(), Some("true"));
}

#[test]
fn theme_alone_produces_a_preferences_record() {
    let storage = MemoryStorage::new();
    storage.set(keys::LEGACY_THEME, "dark").unwrap();

    let report = run_storage_migration(&storage);
    assert_eq!(report.migrated, 1);

    let preferences: Value =
        serde_json::from_str(&storage.get(keys::PREFERENCES).unwrap()).unwrap();
    assert_eq!(preferences["theme"], json!("dark"));
    assert_eq!(preferences["difficulty"], json!(1));
}

#[test]
fn modern_record_under_a_legacy_key_is_left_alone() {
    let storage = MemoryStorage::new();
    seed(
        &storage,
        keys::LEGACY_GAME_STATE,
        &json!({ "gridConfig": {}, "accessibility": {}, "progress": {} }),
    );

    let report = run_storage_migration(&storage);
    assert_eq!(report.migrated, 0);
    assert_eq!(report.skipped, 1);
    assert!(storage.get(keys::GAME_STATE).is_none());
}
