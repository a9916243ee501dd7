//! Reel model — fixed-size visible symbol slots plus transient spin runs

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::symbols::{SymbolId, WeightedSampler};

/// One vertical reel: exactly R visible symbol slots
///
/// Invariant: `slots.len()` equals the row count fixed at creation; slots
/// are replaced in place, never resized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reel {
    /// Column index (0-based)
    column: u8,
    /// Visible symbols, top to bottom
    slots: Vec<SymbolId>,
}

impl Reel {
    /// Initialize a reel with `rows` freshly drawn symbols
    pub fn fill(column: u8, rows: u8, sampler: &WeightedSampler, rng: &mut impl Rng) -> Self {
        let slots = (0..rows).map(|_| sampler.pick(rng)).collect();
        Self { column, slots }
    }

    /// Overwrite all slots with fresh draws — the spin outcome for this reel
    ///
    /// All-R-slots-at-once: no intermediate state with stale symbols is
    /// ever observable.
    pub fn replace_all(&mut self, sampler: &WeightedSampler, rng: &mut impl Rng) {
        let fresh: Vec<SymbolId> = (0..self.slots.len()).map(|_| sampler.pick(rng)).collect();
        self.slots = fresh;
    }

    /// Column index
    pub fn column(&self) -> u8 {
        self.column
    }

    /// Visible symbols, top to bottom
    pub fn slots(&self) -> &[SymbolId] {
        &self.slots
    }

    /// Row count
    pub fn rows(&self) -> usize {
        self.slots.len()
    }

    /// Symbol at a row, if in range
    pub fn symbol_at(&self, row: usize) -> Option<SymbolId> {
        self.slots.get(row).copied()
    }
}

/// Transient run of extra symbols scrolled through the visible window
///
/// Generated fresh per reel per spin, discarded when the reel settles.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinRun {
    symbols: Vec<SymbolId>,
}

impl SpinRun {
    /// Draw `length` extra symbols for one reel's scroll motion
    pub fn generate(length: u8, sampler: &WeightedSampler, rng: &mut impl Rng) -> Self {
        Self {
            symbols: (0..length).map(|_| sampler.pick(rng)).collect(),
        }
    }

    /// Run symbols, in scroll order
    pub fn symbols(&self) -> &[SymbolId] {
        &self.symbols
    }

    /// Run length
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the run is empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
