//! Payline geometry — immutable row-trace configuration
//!
//! Paylines are consumed only by the overlay for highlighting. The engine
//! never evaluates outcomes against them.

use serde::{Deserialize, Serialize};

use crate::config::GridSpec;

/// A payline definition: one row index per reel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Payline index (0-based)
    pub index: u8,
    /// Row positions for each reel (e.g., [0, 1, 2] for a diagonal)
    pub rows: Vec<u8>,
}

impl Payline {
    /// Create a straight line (same row across all reels)
    pub fn straight(index: u8, row: u8, reel_count: u8) -> Self {
        Self {
            index,
            rows: vec![row; reel_count as usize],
        }
    }

    /// Create a top-left to bottom-right diagonal
    pub fn diagonal_down(index: u8, reel_count: u8) -> Self {
        Self {
            index,
            rows: (0..reel_count).collect(),
        }
    }

    /// Create a bottom-left to top-right diagonal
    pub fn diagonal_up(index: u8, reel_count: u8) -> Self {
        Self {
            index,
            rows: (0..reel_count).rev().collect(),
        }
    }

    /// Whether this payline fits a grid (length and row range)
    pub fn fits(&self, grid: &GridSpec) -> bool {
        self.rows.len() == grid.reels as usize && self.rows.iter().all(|&r| r < grid.rows)
    }
}

/// Standard payline patterns for the classic 3×3 grid
///
/// Middle, top, bottom rows plus both diagonals — in highlight order.
pub fn standard_3x3_paylines() -> Vec<Payline> {
    vec![
        Payline::straight(0, 1, 3),
        Payline::straight(1, 0, 3),
        Payline::straight(2, 2, 3),
        Payline::diagonal_down(3, 3),
        Payline::diagonal_up(4, 3),
    ]
}
