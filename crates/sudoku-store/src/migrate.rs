//! One-time best-effort migration of legacy storage keys.
//!
//! Each legacy key is parsed independently: a corrupt record is logged
//! and skipped without aborting the migration of the others. The
//! completion sentinel is written exactly once, after the pass, and
//! guards every later startup against re-migration.

use crate::keys;
use crate::store::Storage;
use serde_json::Value;
use sudoku_engine::{
    is_legacy_game_state, is_legacy_preferences, migrate_legacy_game_state,
    migrate_legacy_preferences, migrate_legacy_stats,
};

/// What a migration pass did, for the caller's logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Legacy records successfully rewritten under modern keys.
    pub migrated: usize,
    /// Legacy keys present but skipped (corrupt or already modern).
    pub skipped: usize,
    /// Whether the sentinel short-circuited the whole pass.
    pub already_complete: bool,
}

/// Migrate whatever legacy records exist in `storage` to the modern
/// namespace, then mark migration complete.
pub fn run_storage_migration(storage: &impl Storage) -> MigrationReport {
    if storage.get(keys::MIGRATION_COMPLETE).as_deref() == Some("true") {
        return MigrationReport {
            already_complete: true,
            ..Default::default()
        };
    }

    let mut report = MigrationReport::default();

    if let Some(value) = parse_key(storage, keys::LEGACY_GAME_STATE, &mut report) {
        if is_legacy_game_state(&value) {
            let saved = migrate_legacy_game_state(&value);
            write_json(storage, keys::GAME_STATE, &saved, &mut report);
        } else {
            tracing::debug!(key = keys::LEGACY_GAME_STATE, "record already modern");
            report.skipped += 1;
        }
    }

    // The theme lived under its own legacy key; fold it into the migrated
    // preferences record.
    let theme = storage.get(keys::LEGACY_THEME);
    let legacy_preferences = parse_key(storage, keys::LEGACY_PREFERENCES, &mut report);
    if legacy_preferences.is_some() || theme.is_some() {
        let value = legacy_preferences.unwrap_or(Value::Null);
        if is_legacy_preferences(&value) || value.is_null() {
            let mut preferences = migrate_legacy_preferences(&value);
            if let Some(theme) = theme {
                preferences.theme = theme.trim_matches('"').to_string();
            }
            write_json(storage, keys::PREFERENCES, &preferences, &mut report);
        } else {
            report.skipped += 1;
        }
    }

    if let Some(value) = parse_key(storage, keys::LEGACY_STATS, &mut report) {
        let progress = migrate_legacy_stats(&value);
        write_json(storage, keys::PROGRESS, &progress, &mut report);
    }

    if let Err(err) = storage.set(keys::MIGRATION_COMPLETE, "true") {
        tracing::warn!(%err, "could not persist migration sentinel");
    }
    tracing::info!(
        migrated = report.migrated,
        skipped = report.skipped,
        "legacy storage migration finished"
    );
    report
}

fn parse_key(storage: &impl Storage, key: &str, report: &mut MigrationReport) -> Option<Value> {
    let raw = storage.get(key)?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, %err, "skipping corrupt legacy record");
            report.skipped += 1;
            None
        }
    }
}

fn write_json<T: serde::Serialize>(
    storage: &impl Storage,
    key: &str,
    value: &T,
    report: &mut MigrationReport,
) {
    let Ok(json) = serde_json::to_string(value) else {
        report.skipped += 1;
        return;
    };
    match storage.set(key, &json) {
        Ok(()) => report.migrated += 1,
        Err(err) => {
            tracing::warn!(key, %err, "could not write migrated record");
            report.skipped += 1;
        }
    }
}
