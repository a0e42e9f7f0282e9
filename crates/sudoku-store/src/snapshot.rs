//! Capturing persistable slices of a live session.

use crate::debounce::WriteBatch;
use crate::keys;
use crate::store::Storage;
use sudoku_engine::{GameState, SavedGame};

/// The writes a state change should eventually produce: the whole saved
/// game under the modern namespace plus the per-slice keys the settings
/// screens read on their own.
pub fn write_batch(state: &GameState) -> WriteBatch {
    let mut batch = WriteBatch::new();
    let saved = SavedGame::from_state(state);
    push_json(&mut batch, keys::GAME_STATE, &saved);
    push_json(&mut batch, keys::ACCESSIBILITY_SETTINGS, &state.accessibility);
    push_json(&mut batch, keys::PROGRESS_STATS, &state.progress);
    push_json(&mut batch, keys::GRID_CONFIG, &state.grid_config);
    push_json(&mut batch, keys::DIFFICULTY, &state.difficulty);
    push_json(&mut batch, keys::CHILD_MODE, &state.child_mode);
    batch
}

fn push_json<T: serde::Serialize>(batch: &mut WriteBatch, key: &'static str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => batch.push((key, json)),
        Err(err) => tracing::warn!(key, %err, "failed to serialize snapshot slice"),
    }
}

/// Restore the most recent saved session, if one parses.
pub fn load_saved_game(storage: &impl Storage) -> Option<GameState> {
    let raw = storage.get(keys::GAME_STATE)?;
    match serde_json::from_str::<SavedGame>(&raw) {
        Ok(saved) => Some(saved.restore()),
        Err(err) => {
            tracing::warn!(%err, "saved game did not parse; starting fresh");
            None
        }
    }
}
