//! Grid-size-generic Sudoku engine.
//!
//! The engine validates moves and classifies conflicts for boards of any
//! supported size (4x4, 6x6, 9x9), drives the puzzle lifecycle through a
//! pure reducer with bounded undo history and per-size progress tracking,
//! and migrates persisted state across schema versions without data loss.
//!
//! It performs no I/O and renders nothing: callers dispatch [`Action`]s,
//! the reducer returns the next immutable [`GameState`], and an external
//! collaborator persists whatever slices it cares about.

pub mod config;
pub mod error;
pub mod input;
pub mod migrate;
pub mod progress;
pub mod state;
pub mod validate;

/// A square board; `0` marks an empty cell, `1..=max_value` a filled one.
pub type Board = Vec<Vec<u8>>;

pub use config::{
    config_for, default_config, is_supported_size, valid_values, validate_config, CellSizes,
    GridConfig, DEFAULT_SIZE, SUPPORTED_SIZES,
};
pub use error::EngineError;
pub use input::{
    normalize_difficulty, validate_cell_coordinates, validate_cell_value, validate_difficulty,
    validate_grid, RawDifficulty, DEFAULT_MAX_DIFFICULTY,
};
pub use migrate::{
    ensure_backward_compatible_response, is_legacy_game_state, is_legacy_preferences,
    is_legacy_puzzle, migrate_legacy_game_state, migrate_legacy_preferences, migrate_legacy_stats,
    Preferences, SavedGame,
};
pub use progress::{default_progress, format_time, ProgressStats, ProgressUpdate};
pub use state::{
    reduce, AccessibilitySettings, AccessibilityUpdate, Action, Correctness, GameState, HintInfo,
    PuzzleResponse, HISTORY_LIMIT,
};
pub use validate::{board_is_solved, detect_conflicts, is_move_valid, Conflict, ConflictKind};
