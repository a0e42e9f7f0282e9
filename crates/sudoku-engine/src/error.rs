use thiserror::Error;

/// Errors raised by the grid registry and the strict input validators.
///
/// Move validation and the reducer never produce these: an illegal move is
/// ordinary data during play, and the reducer absorbs malformed actions as
/// no-ops. These errors exist for the caller-facing boundary, where a bad
/// request should be rejected with a concrete reason.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("unsupported grid size {0}: supported sizes are 4, 6, and 9")]
    UnsupportedSize(usize),

    #[error("cell coordinates ({row}, {col}) out of range for a {size}x{size} board")]
    CoordinateRange { row: i64, col: i64, size: usize },

    #[error("cell value {value} out of range: expected 0 (empty) or 1..={max}")]
    CellValue { value: i64, max: u8 },

    #[error("malformed grid: {detail}")]
    GridStructure { detail: String },

    #[error("difficulty must be a number or numeric string, got {found}")]
    InvalidDifficultyType { found: String },

    #[error("difficulty {value} out of range 1..={max}")]
    DifficultyRange { value: f64, max: u8 },
}
