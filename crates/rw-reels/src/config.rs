//! Engine configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paylines::{Payline, standard_3x3_paylines};
use crate::symbols::{CatalogError, SymbolCatalog};
use crate::timing::TimingConfig;

/// Grid specification (reels × rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of reels (columns)
    pub reels: u8,
    /// Number of visible rows per reel
    pub rows: u8,
}

impl GridSpec {
    /// Classic 3×3
    pub fn classic_3x3() -> Self {
        Self { reels: 3, rows: 3 }
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.reels as usize * self.rows as usize
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::classic_3x3()
    }
}

/// Errors from config validation and import
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("grid must have at least one reel and one row (got {reels}×{rows})")]
    EmptyGrid { reels: u8, rows: u8 },

    #[error("payline {index} does not fit a {reels}×{rows} grid")]
    PaylineMismatch { index: u8, reels: u8, rows: u8 },
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Game name
    pub name: String,
    /// Grid specification
    pub grid: GridSpec,
    /// Weighted symbol catalog
    pub catalog: SymbolCatalog,
    /// Payline table (highlight geometry only)
    pub paylines: Vec<Payline>,
    /// Timing configuration
    pub timing: TimingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "Classic Slot".into(),
            grid: GridSpec::default(),
            catalog: SymbolCatalog::classic(),
            paylines: standard_3x3_paylines(),
            timing: TimingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Config for deterministic tests (studio timing, tiny durations)
    pub fn studio() -> Self {
        Self {
            name: "Studio".into(),
            timing: TimingConfig::studio(),
            ..Default::default()
        }
    }

    /// Validate grid, catalog and payline geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.reels == 0 || self.grid.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                reels: self.grid.reels,
                rows: self.grid.rows,
            });
        }
        self.catalog.validate()?;
        for line in &self.paylines {
            if !line.fits(&self.grid) {
                return Err(ConfigError::PaylineMismatch {
                    index: line.index,
                    reels: self.grid.reels,
                    rows: self.grid.rows,
                });
            }
        }
        Ok(())
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Import and validate from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
