//! Lifting legacy persisted records into the current multi-size schema.
//!
//! Persisted values are untrusted: they are arbitrary JSON recovered from
//! storage, possibly written by an old schema version, possibly corrupt.
//! Nothing in this module fails. Every absent or malformed field is
//! defaulted individually, so one bad field never discards the rest of a
//! record.
//!
//! Legacy detection is keyed on the *absence* of new-schema fields
//! (`gridSize`, `gridConfig`, `accessibility`, `progress`) rather than the
//! presence of old ones, so ambiguous partial records are treated
//! conservatively as legacy. The old schema carries no version tag, so no
//! stronger discriminator exists.

use crate::config::{default_config, validate_config, GridConfig, SUPPORTED_SIZES};
use crate::input::{normalize_difficulty, RawDifficulty};
use crate::progress::{default_progress, ProgressStats};
use crate::state::{AccessibilitySettings, GameState};
use crate::Board;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The modern persisted slice of a session, as written by the persistence
/// collaborator and restored on reload.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub grid_config: GridConfig,
    pub puzzle: Option<Board>,
    pub solution: Option<Board>,
    pub user_input: Board,
    pub difficulty: u8,
    pub elapsed_seconds: u64,
    pub hints_used: u32,
    pub child_mode: bool,
    pub accessibility: AccessibilitySettings,
    pub progress: BTreeMap<usize, ProgressStats>,
}

impl SavedGame {
    /// The slice of a live session worth persisting.
    pub fn from_state(state: &GameState) -> Self {
        SavedGame {
            grid_config: state.grid_config.clone(),
            puzzle: state.puzzle.clone(),
            solution: state.solution.clone(),
            user_input: state.user_input.clone(),
            difficulty: state.difficulty,
            elapsed_seconds: state.elapsed_seconds,
            hints_used: state.hints_used,
            child_mode: state.child_mode,
            accessibility: state.accessibility,
            progress: state.progress.clone(),
        }
    }

    /// Rebuild a session from a persisted slice. The restored session is
    /// paused with the timer off; play resumes on the next explicit action.
    ///
    /// The slice is persisted data and therefore untrusted even though it
    /// parsed: an invalid config falls back to the 9x9 default, boards
    /// that do not fit the resulting config are dropped, and the
    /// difficulty is clamped to the config's tier count.
    pub fn restore(self) -> GameState {
        let grid_config = if validate_config(&self.grid_config) {
            self.grid_config
        } else {
            default_config().clone()
        };
        let fits = |board: &Board| crate::input::validate_grid(board, Some(&grid_config)).is_ok();
        let puzzle = self.puzzle.filter(|b| fits(b));
        let solution = self.solution.filter(|b| fits(b));
        let user_input = if fits(&self.user_input) {
            self.user_input
        } else {
            puzzle
                .clone()
                .unwrap_or_else(|| vec![vec![0; grid_config.size]; grid_config.size])
        };
        let history = match &puzzle {
            Some(_) => vec![user_input.clone()],
            None => Vec::new(),
        };
        let mut state = GameState::with_config(grid_config);
        state.difficulty = self
            .difficulty
            .clamp(1, state.grid_config.difficulty_levels);
        state.puzzle = puzzle;
        state.solution = solution;
        state.user_input = user_input;
        state.history = history;
        state.elapsed_seconds = self.elapsed_seconds;
        state.hints_used = self.hints_used;
        state.child_mode = self.child_mode;
        state.accessibility = self.accessibility;
        state.progress = ensure_all_sizes(self.progress);
        state
    }
}

/// Modern user preferences record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: String,
    pub difficulty: u8,
    pub child_mode: bool,
    pub accessibility: AccessibilitySettings,
    pub progress: BTreeMap<usize, ProgressStats>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: "light".to_string(),
            difficulty: 1,
            child_mode: false,
            accessibility: AccessibilitySettings::default(),
            progress: default_progress(),
        }
    }
}

/// Whether a persisted puzzle record predates the multi-size schema.
pub fn is_legacy_puzzle(value: &Value) -> bool {
    match value.as_object() {
        Some(obj) => !obj.contains_key("gridSize"),
        None => false,
    }
}

/// Whether a persisted game-state record predates the multi-size schema.
pub fn is_legacy_game_state(value: &Value) -> bool {
    match value.as_object() {
        Some(obj) => {
            !obj.contains_key("gridConfig")
                || !obj.contains_key("accessibility")
                || !obj.contains_key("progress")
        }
        None => false,
    }
}

/// Whether a persisted preferences record predates the multi-size schema.
/// Legacy preference records never carried accessibility or progress.
pub fn is_legacy_preferences(value: &Value) -> bool {
    match value.as_object() {
        Some(obj) => !obj.contains_key("accessibility") || !obj.contains_key("progress"),
        None => false,
    }
}

/// Lift a legacy game-state record into the modern shape, defaulting every
/// absent or malformed field.
pub fn migrate_legacy_game_state(legacy: &Value) -> SavedGame {
    let obj = legacy.as_object();
    let grid_config = obj
        .and_then(|o| o.get("gridConfig"))
        .and_then(|v| serde_json::from_value::<GridConfig>(v.clone()).ok())
        .filter(validate_config)
        .unwrap_or_else(|| default_config().clone());

    let puzzle = obj.and_then(|o| board_field(o, "puzzle", &grid_config));
    let solution = obj.and_then(|o| board_field(o, "solution", &grid_config));
    let user_input = obj
        .and_then(|o| board_field(o, "userInput", &grid_config))
        .or_else(|| puzzle.clone())
        .unwrap_or_else(|| vec![vec![0; grid_config.size]; grid_config.size]);

    let difficulty = match obj.and_then(|o| o.get("difficulty")) {
        Some(v) => normalize_difficulty(&RawDifficulty::from(v), Some(&grid_config)),
        None => 1,
    };

    SavedGame {
        puzzle,
        solution,
        user_input,
        difficulty,
        elapsed_seconds: obj.map_or(0, |o| u64_field(o, "timer", 0)),
        hints_used: obj.map_or(0, |o| u32_field(o, "hintsUsed", 0)),
        child_mode: obj.is_some_and(|o| bool_field(o, "childMode", false)),
        accessibility: accessibility_overlay(obj.and_then(|o| o.get("accessibility"))),
        progress: progress_overlay(obj.and_then(|o| o.get("progress"))),
        grid_config,
    }
}

/// Lift a legacy preferences record. Accessibility and progress blocks are
/// attached unconditionally since legacy preference records never had them.
pub fn migrate_legacy_preferences(legacy: &Value) -> Preferences {
    let obj = legacy.as_object();
    let difficulty = match obj.and_then(|o| o.get("difficulty")) {
        Some(v) => normalize_difficulty(&RawDifficulty::from(v), None),
        None => 1,
    };
    Preferences {
        theme: obj
            .and_then(|o| o.get("theme"))
            .and_then(Value::as_str)
            .unwrap_or("light")
            .to_string(),
        difficulty,
        child_mode: obj.is_some_and(|o| bool_field(o, "childMode", false)),
        accessibility: accessibility_overlay(obj.and_then(|o| o.get("accessibility"))),
        progress: progress_overlay(obj.and_then(|o| o.get("progress"))),
    }
}

/// Lift a legacy stats record. The old schema tracked a single 9x9
/// aggregate, so everything folds into the size-9 entry; other sizes start
/// zeroed.
pub fn migrate_legacy_stats(legacy: &Value) -> BTreeMap<usize, ProgressStats> {
    let mut progress = default_progress();
    if let Some(obj) = legacy.as_object() {
        let completed = u32_field(obj, "completed", 0);
        let total_time = u64_field(obj, "totalTime", 0);
        let stats = ProgressStats {
            puzzles_completed: completed,
            total_time,
            average_time: if completed > 0 {
                total_time / u64::from(completed)
            } else {
                0
            },
            best_time: u64_field(obj, "bestTime", 0),
            hints_used: u32_field(obj, "hintsUsed", 0),
            current_streak: u32_field(obj, "streak", 0),
            best_streak: u32_field(obj, "bestStreak", 0),
            achievements: string_list(obj.get("achievements")),
            last_played: obj.get("lastPlayed").and_then(Value::as_u64),
        };
        progress.insert(9, stats);
    }
    progress
}

/// Add the legacy fields old clients expect to a puzzle API response.
///
/// Applies only to responses describing a 9x9 (or size-less) puzzle; an
/// explicitly non-9x9 response passes through untouched rather than imply
/// legacy compatibility it cannot honor.
pub fn ensure_backward_compatible_response(mut response: Value) -> Value {
    let Some(obj) = response.as_object_mut() else {
        return response;
    };
    match obj.get("gridSize").and_then(Value::as_u64) {
        None | Some(9) => {
            obj.entry("solved").or_insert(Value::Bool(true));
            obj.entry("cached").or_insert(Value::Bool(false));
        }
        Some(_) => {}
    }
    response
}

fn u64_field(obj: &Map<String, Value>, key: &str, default: u64) -> u64 {
    obj.get(key).and_then(Value::as_u64).unwrap_or(default)
}

/// Counter fields saturate rather than truncate, so an absurd persisted
/// value degrades to a sane extreme instead of wrapping to a small one.
fn u32_field(obj: &Map<String, Value>, key: &str, default: u32) -> u32 {
    obj.get(key)
        .and_then(Value::as_u64)
        .map_or(default, |v| u32::try_from(v).unwrap_or(u32::MAX))
}

fn bool_field(obj: &Map<String, Value>, key: &str, default: bool) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn board_field(obj: &Map<String, Value>, key: &str, config: &GridConfig) -> Option<Board> {
    let board = serde_json::from_value::<Board>(obj.get(key)?.clone()).ok()?;
    crate::input::validate_grid(&board, Some(config)).ok()?;
    Some(board)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    if let Some(Value::Array(items)) = value {
        for item in items {
            if let Some(s) = item.as_str() {
                if !out.iter().any(|existing| existing == s) {
                    out.push(s.to_string());
                }
            }
        }
    }
    out
}

/// Overlay a possibly-partial accessibility object onto all-false defaults.
fn accessibility_overlay(value: Option<&Value>) -> AccessibilitySettings {
    let mut settings = AccessibilitySettings::default();
    if let Some(Value::Object(obj)) = value {
        settings.high_contrast = bool_field(obj, "highContrast", false);
        settings.large_text = bool_field(obj, "largeText", false);
        settings.reduced_motion = bool_field(obj, "reducedMotion", false);
        settings.voice_announcements = bool_field(obj, "voiceAnnouncements", false);
        settings.sound_effects = bool_field(obj, "soundEffects", false);
    }
    settings
}

/// Overlay a possibly-partial per-size progress object onto zeroed stats
/// for every supported size. Each size's entry is defaulted field by field.
fn progress_overlay(value: Option<&Value>) -> BTreeMap<usize, ProgressStats> {
    let mut progress = default_progress();
    if let Some(Value::Object(obj)) = value {
        for &size in SUPPORTED_SIZES.iter() {
            if let Some(Value::Object(entry)) = obj.get(&size.to_string()) {
                let stats = ProgressStats {
                    puzzles_completed: u32_field(entry, "puzzlesCompleted", 0),
                    total_time: u64_field(entry, "totalTime", 0),
                    average_time: u64_field(entry, "averageTime", 0),
                    best_time: u64_field(entry, "bestTime", 0),
                    hints_used: u32_field(entry, "hintsUsed", 0),
                    current_streak: u32_field(entry, "currentStreak", 0),
                    best_streak: u32_field(entry, "bestStreak", 0),
                    achievements: string_list(entry.get("achievements")),
                    last_played: entry.get("lastPlayed").and_then(Value::as_u64),
                };
                progress.insert(size, stats);
            }
        }
    }
    progress
}

/// Fill any size keys a restored progress map is missing.
fn ensure_all_sizes(
    mut progress: BTreeMap<usize, ProgressStats>,
) -> BTreeMap<usize, ProgressStats> {
    for &size in SUPPORTED_SIZES.iter() {
        progress.entry(size).or_default();
    }
    progress
}
