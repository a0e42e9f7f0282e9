//! The game state machine.
//!
//! A pure reducer over a closed action set. The reducer never fails and
//! never panics: malformed payloads that slipped past the input
//! normalizer are absorbed as no-ops, because this layer sits on the
//! trusted-state boundary where a crash would destroy the session.
//!
//! Dispatch is composed from an ordered list of partial handlers; the
//! first handler to claim an action wins. The order is stable and each
//! action belongs to exactly one handler (the tests assert this).

use crate::config::{config_for, default_config, validate_config, GridConfig};
use crate::progress::{default_progress, ProgressStats, ProgressUpdate};
use crate::validate::board_is_solved;
use crate::Board;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole-board snapshots kept for undo; oldest evicted first.
pub const HISTORY_LIMIT: usize = 10;

/// An active hint overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintInfo {
    pub row: usize,
    pub col: usize,
    pub message: String,
}

/// Result of the most recent answer check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Correctness {
    /// No check since the last board change.
    #[default]
    Unchecked,
    Correct,
    Incorrect,
}

/// Accessibility flags; all default off and survive every session reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettings {
    pub high_contrast: bool,
    pub large_text: bool,
    pub reduced_motion: bool,
    pub voice_announcements: bool,
    pub sound_effects: bool,
}

/// Partial accessibility record; provided fields overwrite, absent fields
/// are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityUpdate {
    pub high_contrast: Option<bool>,
    pub large_text: Option<bool>,
    pub reduced_motion: Option<bool>,
    pub voice_announcements: Option<bool>,
    pub sound_effects: Option<bool>,
}

impl AccessibilitySettings {
    pub fn apply(&mut self, update: &AccessibilityUpdate) {
        if let Some(v) = update.high_contrast {
            self.high_contrast = v;
        }
        if let Some(v) = update.large_text {
            self.large_text = v;
        }
        if let Some(v) = update.reduced_motion {
            self.reduced_motion = v;
        }
        if let Some(v) = update.voice_announcements {
            self.voice_announcements = v;
        }
        if let Some(v) = update.sound_effects {
            self.sound_effects = v;
        }
    }
}

/// Body of the puzzle fetch endpoint's JSON response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleResponse {
    pub puzzle: Board,
    pub solution: Board,
    pub difficulty: u8,
}

impl From<PuzzleResponse> for Action {
    fn from(response: PuzzleResponse) -> Self {
        Action::SetPuzzle {
            puzzle: response.puzzle,
            solution: response.solution,
        }
    }
}

/// Everything dispatched into [`reduce`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    SetPuzzle { puzzle: Board, solution: Board },
    SetError(String),
    ClearError,
    UpdateCell { row: usize, col: usize, value: u8 },
    SetDifficulty(u8),
    CheckAnswer,
    Tick,
    PauseResume,
    Reset,
    ResetAndFetch,
    SetLoading(bool),
    Undo,
    UseHint,
    ShowHint(HintInfo),
    ClearHint,
    ChangeGridSize(usize),
    SetGridConfig(GridConfig),
    ToggleChildMode,
    SetChildMode(bool),
    UpdateAccessibility(AccessibilityUpdate),
    ToggleHighContrast,
    ToggleLargeText,
    ToggleReducedMotion,
    ToggleVoiceAnnouncements,
    ToggleSoundEffects,
    UpdateProgress { size: usize, update: ProgressUpdate },
    CompletePuzzle { size: usize, time_seconds: u64, hints_used: u32, completed_at: u64 },
    AddAchievement { size: usize, achievement: String },
}

/// The aggregate session state. Mutated only by [`reduce`], which always
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub puzzle: Option<Board>,
    pub solution: Option<Board>,
    pub grid_config: GridConfig,
    pub user_input: Board,
    pub history: Vec<Board>,
    pub difficulty: u8,
    pub elapsed_seconds: u64,
    pub timer_active: bool,
    pub is_paused: bool,
    pub is_loading: bool,
    pub correctness: Correctness,
    pub error: Option<String>,
    pub hints_used: u32,
    pub show_hint: Option<HintInfo>,
    pub child_mode: bool,
    pub accessibility: AccessibilitySettings,
    pub progress: BTreeMap<usize, ProgressStats>,
}

fn empty_board(size: usize) -> Board {
    vec![vec![0; size]; size]
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh 9x9 session with no puzzle loaded.
    pub fn new() -> Self {
        Self::with_config(default_config().clone())
    }

    /// A fresh session for an arbitrary configuration.
    pub fn with_config(grid_config: GridConfig) -> Self {
        let user_input = empty_board(grid_config.size);
        GameState {
            puzzle: None,
            solution: None,
            user_input,
            history: Vec::new(),
            difficulty: 1,
            elapsed_seconds: 0,
            timer_active: false,
            is_paused: false,
            is_loading: false,
            correctness: Correctness::Unchecked,
            error: None,
            hints_used: 0,
            show_hint: None,
            child_mode: false,
            accessibility: AccessibilitySettings::default(),
            progress: default_progress(),
            grid_config,
        }
    }

    /// Clear every per-session field, keeping the cross-cutting ones
    /// (config, difficulty, child mode, accessibility, progress).
    fn reset_session(&self) -> GameState {
        GameState {
            puzzle: None,
            solution: None,
            user_input: empty_board(self.grid_config.size),
            history: Vec::new(),
            elapsed_seconds: 0,
            timer_active: false,
            is_paused: false,
            is_loading: false,
            correctness: Correctness::Unchecked,
            error: None,
            hints_used: 0,
            show_hint: None,
            ..self.clone()
        }
    }
}

type Handler = fn(&GameState, &Action) -> Option<GameState>;

/// Handler order is part of the contract: were two handlers ever to claim
/// the same action, the earlier one would win.
pub(crate) const HANDLERS: [Handler; 5] = [
    session_handler,
    board_handler,
    hint_handler,
    settings_handler,
    progress_handler,
];

/// Apply an action to the state, returning the next state.
///
/// Total over the action set; an action no handler claims leaves the
/// state untouched.
pub fn reduce(state: &GameState, action: &Action) -> GameState {
    for handler in HANDLERS {
        if let Some(next) = handler(state, action) {
            return next;
        }
    }
    tracing::debug!("action fell through every handler");
    state.clone()
}

/// Puzzle lifecycle, timer, difficulty, and grid-size transitions.
fn session_handler(state: &GameState, action: &Action) -> Option<GameState> {
    match action {
        Action::SetPuzzle { puzzle, solution } => {
            // The user's board starts as the given clues; zeros stay zero.
            let user_input = puzzle.clone();
            Some(GameState {
                puzzle: Some(puzzle.clone()),
                solution: Some(solution.clone()),
                history: vec![user_input.clone()],
                user_input,
                elapsed_seconds: 0,
                timer_active: true,
                is_paused: false,
                is_loading: false,
                correctness: Correctness::Unchecked,
                error: None,
                hints_used: 0,
                show_hint: None,
                ..state.clone()
            })
        }
        Action::SetError(message) => Some(GameState {
            error: Some(message.clone()),
            is_loading: false,
            ..state.clone()
        }),
        Action::ClearError => Some(GameState {
            error: None,
            ..state.clone()
        }),
        Action::SetDifficulty(difficulty) => {
            let max = state.grid_config.difficulty_levels;
            let mut next = state.reset_session();
            next.difficulty = (*difficulty).clamp(1, max);
            Some(next)
        }
        Action::CheckAnswer => {
            // Nothing to compare against; absorbed here so the action
            // still belongs to exactly one handler.
            let Some(solution) = state.solution.as_ref() else {
                return Some(state.clone());
            };
            let solved = board_is_solved(&state.user_input, solution);
            Some(GameState {
                correctness: if solved {
                    Correctness::Correct
                } else {
                    Correctness::Incorrect
                },
                timer_active: if solved { false } else { state.timer_active },
                ..state.clone()
            })
        }
        Action::Tick => {
            if state.timer_active && !state.is_paused {
                Some(GameState {
                    elapsed_seconds: state.elapsed_seconds + 1,
                    ..state.clone()
                })
            } else {
                Some(state.clone())
            }
        }
        Action::PauseResume => Some(GameState {
            is_paused: !state.is_paused,
            ..state.clone()
        }),
        Action::Reset => Some(state.reset_session()),
        Action::ResetAndFetch => {
            let mut next = state.reset_session();
            next.is_loading = true;
            Some(next)
        }
        Action::SetLoading(loading) => Some(GameState {
            is_loading: *loading,
            ..state.clone()
        }),
        Action::ChangeGridSize(size) => {
            let Ok(config) = config_for(*size) else {
                // Unsupported size: absorb rather than fail.
                return Some(state.clone());
            };
            let mut next = state.reset_session();
            next.grid_config = config.clone();
            next.user_input = empty_board(config.size);
            next.difficulty = state.difficulty.clamp(1, config.difficulty_levels);
            // One-directional: a child-friendly size turns child mode on,
            // but leaving one never turns it off.
            next.child_mode = state.child_mode || config.child_friendly;
            Some(next)
        }
        Action::SetGridConfig(config) => {
            if !validate_config(config) {
                return Some(state.clone());
            }
            Some(GameState {
                grid_config: config.clone(),
                difficulty: state.difficulty.clamp(1, config.difficulty_levels),
                ..state.clone()
            })
        }
        _ => None,
    }
}

/// Cell edits and undo over the bounded snapshot history.
fn board_handler(state: &GameState, action: &Action) -> Option<GameState> {
    match action {
        Action::UpdateCell { row, col, value } => {
            if state.puzzle.is_none()
                || *row >= state.grid_config.size
                || *col >= state.grid_config.size
                || *value > state.grid_config.max_value
            {
                return Some(state.clone());
            }
            let mut user_input = state.user_input.clone();
            user_input[*row][*col] = *value;
            let mut history = state.history.clone();
            history.push(user_input.clone());
            if history.len() > HISTORY_LIMIT {
                let excess = history.len() - HISTORY_LIMIT;
                history.drain(..excess);
            }
            Some(GameState {
                user_input,
                history,
                correctness: Correctness::Unchecked,
                ..state.clone()
            })
        }
        Action::Undo => {
            if state.history.len() <= 1 {
                return Some(state.clone());
            }
            let mut history = state.history.clone();
            history.pop();
            let user_input = history
                .last()
                .cloned()
                .unwrap_or_else(|| empty_board(state.grid_config.size));
            Some(GameState {
                user_input,
                history,
                show_hint: None,
                ..state.clone()
            })
        }
        _ => None,
    }
}

/// Hint counter and overlay; independent of the undo history.
fn hint_handler(state: &GameState, action: &Action) -> Option<GameState> {
    match action {
        Action::UseHint => Some(GameState {
            hints_used: state.hints_used + 1,
            ..state.clone()
        }),
        Action::ShowHint(hint) => Some(GameState {
            show_hint: Some(hint.clone()),
            ..state.clone()
        }),
        Action::ClearHint => Some(GameState {
            show_hint: None,
            ..state.clone()
        }),
        _ => None,
    }
}

/// Child mode and accessibility flags.
fn settings_handler(state: &GameState, action: &Action) -> Option<GameState> {
    let toggled = |f: fn(&mut AccessibilitySettings)| {
        let mut next = state.clone();
        f(&mut next.accessibility);
        Some(next)
    };
    match action {
        Action::ToggleChildMode => Some(GameState {
            child_mode: !state.child_mode,
            ..state.clone()
        }),
        Action::SetChildMode(enabled) => Some(GameState {
            child_mode: *enabled,
            ..state.clone()
        }),
        Action::UpdateAccessibility(update) => {
            let mut next = state.clone();
            next.accessibility.apply(update);
            Some(next)
        }
        Action::ToggleHighContrast => toggled(|a| a.high_contrast = !a.high_contrast),
        Action::ToggleLargeText => toggled(|a| a.large_text = !a.large_text),
        Action::ToggleReducedMotion => toggled(|a| a.reduced_motion = !a.reduced_motion),
        Action::ToggleVoiceAnnouncements => {
            toggled(|a| a.voice_announcements = !a.voice_announcements)
        }
        Action::ToggleSoundEffects => toggled(|a| a.sound_effects = !a.sound_effects),
        _ => None,
    }
}

/// Per-size progress aggregates and achievements.
fn progress_handler(state: &GameState, action: &Action) -> Option<GameState> {
    match action {
        Action::UpdateProgress { size, update } => {
            let mut next = state.clone();
            match next.progress.get_mut(size) {
                Some(stats) => stats.apply(update),
                None => return Some(state.clone()),
            }
            Some(next)
        }
        Action::CompletePuzzle {
            size,
            time_seconds,
            hints_used,
            completed_at,
        } => {
            let mut next = state.clone();
            match next.progress.get_mut(size) {
                Some(stats) => stats.record_completion(*time_seconds, *hints_used, *completed_at),
                None => return Some(state.clone()),
            }
            Some(next)
        }
        Action::AddAchievement { size, achievement } => {
            let mut next = state.clone();
            match next.progress.get_mut(size) {
                Some(stats) => {
                    if !stats.add_achievement(achievement) {
                        // Already earned; idempotent.
                        return Some(state.clone());
                    }
                }
                None => return Some(state.clone()),
            }
            Some(next)
        }
        _ => None,
    }
}
