//! Normalization and validation of raw external input.
//!
//! Two paths exist on purpose. User-entered values (keyboard, API params)
//! go through the strict `validate_*` functions and are rejected with a
//! typed [`EngineError`]. Values recovered from persistence go through the
//! lenient [`normalize_difficulty`], which never fails: a corrupt stored
//! difficulty must not take down the session it is restoring.

use crate::config::{default_config, GridConfig};
use crate::error::EngineError;
use crate::Board;
use serde_json::Value;

/// Highest difficulty accepted when no configuration is supplied.
pub const DEFAULT_MAX_DIFFICULTY: u8 = 10;

/// A difficulty value as it arrives from the outside world, before any
/// typing has been established.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDifficulty {
    Number(f64),
    Text(String),
    Absent,
    /// Present but of a type that can never be a difficulty; carries the
    /// type name for error messages.
    Other(&'static str),
}

impl From<f64> for RawDifficulty {
    fn from(value: f64) -> Self {
        RawDifficulty::Number(value)
    }
}

impl From<&str> for RawDifficulty {
    fn from(value: &str) -> Self {
        RawDifficulty::Text(value.to_string())
    }
}

impl From<&Value> for RawDifficulty {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => RawDifficulty::Absent,
            Value::Number(n) => match n.as_f64() {
                Some(f) => RawDifficulty::Number(f),
                None => RawDifficulty::Other("number"),
            },
            Value::String(s) => RawDifficulty::Text(s.clone()),
            Value::Bool(_) => RawDifficulty::Other("boolean"),
            Value::Array(_) => RawDifficulty::Other("array"),
            Value::Object(_) => RawDifficulty::Other("object"),
        }
    }
}

fn max_difficulty(config: Option<&GridConfig>) -> u8 {
    config.map_or(DEFAULT_MAX_DIFFICULTY, |c| c.difficulty_levels)
}

/// Strictly validate a raw difficulty.
///
/// Numbers and numeric strings pass; anything else fails with
/// [`EngineError::InvalidDifficultyType`]. Values outside
/// `[1, max]` (the config's tier count, or [`DEFAULT_MAX_DIFFICULTY`])
/// fail with [`EngineError::DifficultyRange`]. In-range values pass
/// through unmodified; decimals are preserved, not rounded.
pub fn validate_difficulty(
    raw: &RawDifficulty,
    config: Option<&GridConfig>,
) -> Result<f64, EngineError> {
    let max = max_difficulty(config);
    let value = match raw {
        RawDifficulty::Number(n) => *n,
        RawDifficulty::Text(s) => {
            s.trim()
                .parse::<f64>()
                .map_err(|_| EngineError::InvalidDifficultyType {
                    found: format!("\"{s}\""),
                })?
        }
        RawDifficulty::Absent => {
            return Err(EngineError::InvalidDifficultyType {
                found: "nothing".to_string(),
            })
        }
        RawDifficulty::Other(kind) => {
            return Err(EngineError::InvalidDifficultyType {
                found: (*kind).to_string(),
            })
        }
    };
    if !(value >= 1.0 && value <= max as f64) {
        // Also catches NaN and the infinities.
        return Err(EngineError::DifficultyRange { value, max });
    }
    Ok(value)
}

/// Leniently coerce a raw difficulty into the legal range.
///
/// Never fails: non-numeric or absent input defaults to 1, out-of-range
/// input clamps (infinities included), fractional input rounds to the
/// nearest tier with halves rounding up.
pub fn normalize_difficulty(raw: &RawDifficulty, config: Option<&GridConfig>) -> u8 {
    let max = max_difficulty(config);
    let value = match raw {
        RawDifficulty::Number(n) => *n,
        RawDifficulty::Text(s) => match s.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => return 1,
        },
        RawDifficulty::Absent | RawDifficulty::Other(_) => return 1,
    };
    if value.is_nan() {
        return 1;
    }
    let rounded = (value + 0.5).floor();
    if rounded < 1.0 {
        1
    } else if rounded > max as f64 {
        max
    } else {
        rounded as u8
    }
}

/// Strictly validate a cell coordinate pair against a configuration
/// (defaulting to the 9x9 board).
pub fn validate_cell_coordinates(
    row: i64,
    col: i64,
    config: Option<&GridConfig>,
) -> Result<(), EngineError> {
    let size = config.unwrap_or_else(|| default_config()).size;
    let in_range = |v: i64| v >= 0 && (v as usize) < size;
    if in_range(row) && in_range(col) {
        Ok(())
    } else {
        Err(EngineError::CoordinateRange { row, col, size })
    }
}

/// Strictly validate a cell value against a configuration (defaulting to
/// the 9x9 board). Zero is legal: it clears a cell.
pub fn validate_cell_value(value: i64, config: Option<&GridConfig>) -> Result<(), EngineError> {
    let max = config.unwrap_or_else(|| default_config()).max_value;
    if value >= 0 && value <= max as i64 {
        Ok(())
    } else {
        Err(EngineError::CellValue { value, max })
    }
}

/// Strictly validate a whole grid's structure: outer length, each row's
/// length, and every cell's range. The error names the first offense.
pub fn validate_grid(board: &Board, config: Option<&GridConfig>) -> Result<(), EngineError> {
    let config = config.unwrap_or_else(|| default_config());
    if board.len() != config.size {
        return Err(EngineError::GridStructure {
            detail: format!("expected {} rows, got {}", config.size, board.len()),
        });
    }
    for (r, row) in board.iter().enumerate() {
        if row.len() != config.size {
            return Err(EngineError::GridStructure {
                detail: format!("row {r} has {} cells, expected {}", row.len(), config.size),
            });
        }
        for (c, &cell) in row.iter().enumerate() {
            if cell > config.max_value {
                return Err(EngineError::GridStructure {
                    detail: format!(
                        "cell ({r}, {c}) holds {cell}, expected 0..={}",
                        config.max_value
                    ),
                });
            }
        }
    }
    Ok(())
}
