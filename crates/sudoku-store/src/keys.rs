//! The persisted storage key schema.

/// Legacy keys written by the single-size 9x9 schema.
pub const LEGACY_GAME_STATE: &str = "sudoku-game-state";
pub const LEGACY_PREFERENCES: &str = "sudoku-preferences";
pub const LEGACY_STATS: &str = "sudoku-stats";
pub const LEGACY_THEME: &str = "sudoku-theme";

/// Modern per-slice keys.
pub const ACCESSIBILITY_SETTINGS: &str = "sudoku-accessibility-settings";
pub const PROGRESS_STATS: &str = "sudoku-progress-stats";
pub const CHILD_MODE: &str = "sudoku-child-mode";
pub const GRID_CONFIG: &str = "sudoku-grid-config";
pub const DIFFICULTY: &str = "sudoku-difficulty";

/// Migrated-namespace keys the storage migrator writes.
pub const GAME_STATE: &str = "multi-sudoku-game-state";
pub const PREFERENCES: &str = "multi-sudoku-preferences";
pub const PROGRESS: &str = "multi-sudoku-progress";

/// Sentinel marking a completed one-time migration.
pub const MIGRATION_COMPLETE: &str = "sudoku-migration-complete";

/// All legacy keys the migrator visits, in migration order.
pub const LEGACY_KEYS: [&str; 4] = [
    LEGACY_GAME_STATE,
    LEGACY_PREFERENCES,
    LEGACY_STATS,
    LEGACY_THEME,
];
