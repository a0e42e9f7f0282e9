//! Move legality and conflict classification.
//!
//! The uniqueness rules are parameterized by the active [`GridConfig`], so
//! the same scans cover 3x3 boxes on a 9x9 board and 2x3 boxes on a 6x6
//! board. Nothing here returns an error: an illegal move is an expected
//! outcome during play, so illegality is reported as a value.

use crate::config::GridConfig;
use crate::Board;
use serde::{Deserialize, Serialize};

/// Which uniqueness constraint a placement violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Row,
    Column,
    Box,
}

/// Outcome of [`detect_conflicts`].
///
/// `kind` is `None` either when there is no conflict at all or when the
/// placement failed the bounds/range checks before any uniqueness scan ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub has_conflict: bool,
    pub kind: Option<ConflictKind>,
}

impl Conflict {
    fn none() -> Self {
        Conflict {
            has_conflict: false,
            kind: None,
        }
    }
}

/// Whether placing `value` at `(row, col)` is legal on `board`.
///
/// Checks short-circuit in order: bounds, value range, then row, column,
/// and sub-box uniqueness. A `value` of zero clears a cell and is always
/// legal once bounds and range pass. The probed cell itself is skipped in
/// every scan, so re-asserting a cell's current value is legal.
pub fn is_move_valid(
    config: &GridConfig,
    board: &Board,
    row: usize,
    col: usize,
    value: u8,
) -> bool {
    if row >= config.size || col >= config.size {
        return false;
    }
    if value > config.max_value {
        return false;
    }
    if value == 0 {
        return true;
    }
    !row_has_value(board, row, col, value, config.size)
        && !column_has_value(board, row, col, value, config.size)
        && !box_has_value(config, board, row, col, value)
}

/// Classify why a placement is illegal, if it is.
///
/// The classification order is row, then column, then box; only the first
/// violated constraint is reported, even when several are violated at
/// once. That order is a user-facing contract (it decides which highlight
/// the UI shows) and must stay stable.
pub fn detect_conflicts(
    config: &GridConfig,
    board: &Board,
    row: usize,
    col: usize,
    value: u8,
) -> Conflict {
    if row >= config.size || col >= config.size || value > config.max_value {
        return Conflict {
            has_conflict: true,
            kind: None,
        };
    }
    if value == 0 {
        return Conflict::none();
    }
    let kind = if row_has_value(board, row, col, value, config.size) {
        Some(ConflictKind::Row)
    } else if column_has_value(board, row, col, value, config.size) {
        Some(ConflictKind::Column)
    } else if box_has_value(config, board, row, col, value) {
        Some(ConflictKind::Box)
    } else {
        return Conflict::none();
    };
    Conflict {
        has_conflict: true,
        kind,
    }
}

/// Whether `board` matches `solution` cell for cell.
pub fn board_is_solved(board: &Board, solution: &Board) -> bool {
    board == solution
}

fn row_has_value(board: &Board, row: usize, col: usize, value: u8, size: usize) -> bool {
    (0..size).any(|c| c != col && board[row][c] == value)
}

fn column_has_value(board: &Board, row: usize, col: usize, value: u8, size: usize) -> bool {
    (0..size).any(|r| r != row && board[r][col] == value)
}

fn box_has_value(config: &GridConfig, board: &Board, row: usize, col: usize, value: u8) -> bool {
    let box_row = (row / config.box_rows) * config.box_rows;
    let box_col = (col / config.box_cols) * config.box_cols;
    for r in box_row..box_row + config.box_rows {
        for c in box_col..box_col + config.box_cols {
            if (r != row || c != col) && board[r][c] == value {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_for;

    fn empty_board(size: usize) -> Board {
        vec![vec![0; size]; size]
    }

    #[test]
    fn any_value_is_legal_on_an_empty_board() {
        for size in [4, 6, 9] {
            let config = config_for(size).unwrap();
            let board = empty_board(size);
            for row in 0..size {
                for col in 0..size {
                    for value in 0..=config.max_value {
                        assert!(
                            is_move_valid(config, &board, row, col, value),
                            "size {size} ({row},{col})={value}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_bounds_and_out_of_range_are_illegal() {
        let config = config_for(9).unwrap();
        let board = empty_board(9);
        assert!(!is_move_valid(config, &board, 9, 0, 1));
        assert!(!is_move_valid(config, &board, 0, 9, 1));
        assert!(!is_move_valid(config, &board, 0, 0, 10));
    }

    #[test]
    fn duplicate_in_row_column_or_box_is_illegal() {
        let config = config_for(9).unwrap();
        let mut board = empty_board(9);
        board[4][4] = 7;

        // Same row, same column, same box.
        assert!(!is_move_valid(config, &board, 4, 8, 7));
        assert!(!is_move_valid(config, &board, 0, 4, 7));
        assert!(!is_move_valid(config, &board, 3, 3, 7));

        // Unrelated cell is fine.
        assert!(is_move_valid(config, &board, 0, 0, 7));
    }

    #[test]
    fn clearing_a_cell_is_always_legal() {
        let config = config_for(9).unwrap();
        let mut board = empty_board(9);
        board[0][0] = 5;
        board[0][1] = 5;
        assert!(is_move_valid(config, &board, 0, 1, 0));
    }

    #[test]
    fn reasserting_the_current_value_is_legal() {
        let config = config_for(9).unwrap();
        let mut board = empty_board(9);
        board[2][3] = 6;
        assert!(is_move_valid(config, &board, 2, 3, 6));
    }

    #[test]
    fn rectangular_boxes_use_the_configured_geometry() {
        // 6x6 boxes are 2 rows by 3 columns: (0,0) and (1,2) share a box,
        // (2,0) does not.
        let config = config_for(6).unwrap();
        let mut board = empty_board(6);
        board[0][0] = 3;
        assert!(!is_move_valid(config, &board, 1, 2, 3));
        // (2,1) is outside the box and shares no row or column with (0,0).
        assert!(is_move_valid(config, &board, 2, 1, 3));
        assert_eq!(
            detect_conflicts(config, &board, 1, 2, 3).kind,
            Some(ConflictKind::Box)
        );
    }

    #[test]
    fn conflict_priority_is_row_then_column_then_box() {
        let config = config_for(9).unwrap();

        // Both a row and a box conflict: row wins.
        let mut board = empty_board(9);
        board[0][1] = 4; // same row and same box as (0,0)
        let conflict = detect_conflicts(config, &board, 0, 0, 4);
        assert!(conflict.has_conflict);
        assert_eq!(conflict.kind, Some(ConflictKind::Row));

        // Both a column and a box conflict: column wins.
        let mut board = empty_board(9);
        board[1][0] = 4; // same column and same box as (0,0)
        let conflict = detect_conflicts(config, &board, 0, 0, 4);
        assert_eq!(conflict.kind, Some(ConflictKind::Column));

        // Box only.
        let mut board = empty_board(9);
        board[1][1] = 4;
        let conflict = detect_conflicts(config, &board, 0, 0, 4);
        assert_eq!(conflict.kind, Some(ConflictKind::Box));
    }

    #[test]
    fn legal_or_clearing_placements_report_no_conflict() {
        let config = config_for(9).unwrap();
        let mut board = empty_board(9);
        board[0][0] = 4;
        assert_eq!(
            detect_conflicts(config, &board, 5, 5, 4),
            Conflict {
                has_conflict: false,
                kind: None
            }
        );
        // Clearing never conflicts even next to a duplicate.
        assert_eq!(
            detect_conflicts(config, &board, 0, 1, 0),
            Conflict {
                has_conflict: false,
                kind: None
            }
        );
    }

    #[test]
    fn bounds_failures_have_no_classified_kind() {
        let config = config_for(4).unwrap();
        let board = empty_board(4);
        let conflict = detect_conflicts(config, &board, 7, 0, 1);
        assert!(conflict.has_conflict);
        assert_eq!(conflict.kind, None);
    }
}
