//! Static catalog of supported board shapes.
//!
//! Each supported edge length (4, 6, 9) has exactly one [`GridConfig`]
//! describing its sub-box geometry, legal value range, clue bounds, and
//! presentation hints. The catalog is built once and only ever read
//! through the accessor functions here.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Cell edge length in pixels per device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSizes {
    pub desktop: u32,
    pub tablet: u32,
    pub mobile: u32,
}

impl CellSizes {
    fn all_positive(&self) -> bool {
        self.desktop > 0 && self.tablet > 0 && self.mobile > 0
    }
}

/// Immutable descriptor for one supported board shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    /// Board edge length.
    pub size: usize,
    /// Rows per sub-box.
    pub box_rows: usize,
    /// Columns per sub-box.
    pub box_cols: usize,
    /// Largest legal cell value; always equals `size`.
    pub max_value: u8,
    /// Fewest pre-filled cells a generated puzzle may have.
    pub min_clues: usize,
    /// Most pre-filled cells a generated puzzle may have.
    pub max_clues: usize,
    /// Number of difficulty tiers offered at this size.
    pub difficulty_levels: u8,
    /// Rendering hint for the UI collaborator.
    pub cell_sizes: CellSizes,
    /// Whether switching to this size should turn child mode on.
    pub child_friendly: bool,
    /// Human-readable name, e.g. "Classic 9x9".
    pub label: String,
}

/// The board sizes present in the catalog, ascending.
pub const SUPPORTED_SIZES: [usize; 3] = [4, 6, 9];

/// Size of the default configuration.
pub const DEFAULT_SIZE: usize = 9;

static CATALOG: OnceLock<BTreeMap<usize, GridConfig>> = OnceLock::new();

fn catalog() -> &'static BTreeMap<usize, GridConfig> {
    CATALOG.get_or_init(|| {
        let entries = [
            GridConfig {
                size: 4,
                box_rows: 2,
                box_cols: 2,
                max_value: 4,
                min_clues: 4,
                max_clues: 10,
                difficulty_levels: 2,
                cell_sizes: CellSizes {
                    desktop: 72,
                    tablet: 64,
                    mobile: 56,
                },
                child_friendly: true,
                label: "Mini 4x4".to_string(),
            },
            GridConfig {
                size: 6,
                box_rows: 2,
                box_cols: 3,
                max_value: 6,
                min_clues: 8,
                max_clues: 20,
                difficulty_levels: 3,
                cell_sizes: CellSizes {
                    desktop: 60,
                    tablet: 54,
                    mobile: 44,
                },
                child_friendly: true,
                label: "Kids 6x6".to_string(),
            },
            GridConfig {
                size: 9,
                box_rows: 3,
                box_cols: 3,
                max_value: 9,
                min_clues: 17,
                max_clues: 40,
                difficulty_levels: 5,
                cell_sizes: CellSizes {
                    desktop: 50,
                    tablet: 44,
                    mobile: 36,
                },
                child_friendly: false,
                label: "Classic 9x9".to_string(),
            },
        ];
        entries.into_iter().map(|c| (c.size, c)).collect()
    })
}

/// Look up the configuration for a board size.
pub fn config_for(size: usize) -> Result<&'static GridConfig, EngineError> {
    catalog()
        .get(&size)
        .ok_or(EngineError::UnsupportedSize(size))
}

/// The default 9x9 configuration every session starts from.
pub fn default_config() -> &'static GridConfig {
    catalog()
        .get(&DEFAULT_SIZE)
        .unwrap_or_else(|| unreachable!("catalog always contains the default size"))
}

/// Whether `size` has a catalog entry.
pub fn is_supported_size(size: usize) -> bool {
    catalog().contains_key(&size)
}

/// Sanity-check a configuration that arrived from persisted or external
/// data rather than from the catalog.
pub fn validate_config(config: &GridConfig) -> bool {
    config.box_rows * config.box_cols == config.size
        && config.max_value as usize == config.size
        && config.min_clues < config.max_clues
        && config.difficulty_levels > 0
        && config.cell_sizes.all_positive()
}

/// The legal cell values for a configuration, ascending.
pub fn valid_values(config: &GridConfig) -> impl Iterator<Item = u8> {
    1..=config.max_value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_supported_sizes() {
        for size in SUPPORTED_SIZES {
            let config = config_for(size).unwrap();
            assert_eq!(config.size, size);
            assert!(validate_config(config), "catalog entry for {size} invalid");
        }
    }

    #[test]
    fn unsupported_size_is_rejected() {
        assert_eq!(config_for(5), Err(EngineError::UnsupportedSize(5)));
        assert_eq!(config_for(0), Err(EngineError::UnsupportedSize(0)));
        assert_eq!(config_for(16), Err(EngineError::UnsupportedSize(16)));
        assert!(!is_supported_size(5));
        assert!(is_supported_size(6));
    }

    #[test]
    fn default_config_is_classic() {
        let config = default_config();
        assert_eq!(config.size, 9);
        assert_eq!((config.box_rows, config.box_cols), (3, 3));
        assert!(!config.child_friendly);
    }

    #[test]
    fn six_by_six_uses_rectangular_boxes() {
        let config = config_for(6).unwrap();
        assert_eq!((config.box_rows, config.box_cols), (2, 3));
        assert!(config.child_friendly);
    }

    #[test]
    fn valid_values_are_ordered_and_restartable() {
        let config = config_for(4).unwrap();
        let first: Vec<u8> = valid_values(config).collect();
        let second: Vec<u8> = valid_values(config).collect();
        assert_eq!(first, vec![1, 2, 3, 4]);
        assert_eq!(first, second);
    }

    #[test]
    fn validate_config_rejects_bad_geometry() {
        let mut config = config_for(9).unwrap().clone();
        config.box_rows = 2;
        assert!(!validate_config(&config));

        let mut config = config_for(9).unwrap().clone();
        config.max_value = 8;
        assert!(!validate_config(&config));

        let mut config = config_for(9).unwrap().clone();
        config.min_clues = config.max_clues;
        assert!(!validate_config(&config));

        let mut config = config_for(9).unwrap().clone();
        config.difficulty_levels = 0;
        assert!(!validate_config(&config));

        let mut config = config_for(9).unwrap().clone();
        config.cell_sizes.mobile = 0;
        assert!(!validate_config(&config));
    }
}
