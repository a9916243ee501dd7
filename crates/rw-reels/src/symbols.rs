//! Symbol definitions and the weighted catalog

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque symbol identifier — visual identity only, no numeric value
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

/// A catalog entry: one symbol with its selection weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDef {
    /// Unique symbol ID
    pub id: SymbolId,
    /// Symbol name (e.g., "seven", "cherry")
    pub name: String,
    /// Selection weight (higher = more frequent)
    pub weight: u32,
}

impl SymbolDef {
    /// Create a catalog entry
    pub fn new(id: u32, name: impl Into<String>, weight: u32) -> Self {
        Self {
            id: SymbolId(id),
            name: name.into(),
            weight,
        }
    }
}

/// Errors from catalog validation
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("symbol catalog is empty")]
    Empty,

    #[error("symbol '{name}' has zero weight")]
    ZeroWeight { name: String },

    #[error("duplicate symbol id {0:?}")]
    DuplicateId(SymbolId),
}

/// Weighted symbol catalog
///
/// Explicit weight table replacing the duplicated-list scheme: a weight of
/// N is equivalent to N copies of the symbol in a flat list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolCatalog {
    entries: Vec<SymbolDef>,
}

impl SymbolCatalog {
    /// Create from entries
    pub fn new(entries: Vec<SymbolDef>) -> Self {
        Self { entries }
    }

    /// The classic fruit-machine catalog
    ///
    /// Weights match the original duplicate counts of the flat list
    /// (21 effective entries total).
    pub fn classic() -> Self {
        Self::new(vec![
            SymbolDef::new(1, "seven", 4),
            SymbolDef::new(2, "sloticon", 3),
            SymbolDef::new(3, "cherry", 4),
            SymbolDef::new(4, "bar", 2),
            SymbolDef::new(5, "bell", 2),
            SymbolDef::new(6, "strawberry", 2),
            SymbolDef::new(7, "melon", 2),
            SymbolDef::new(8, "chips", 2),
        ])
    }

    /// Validate the catalog: non-empty, positive weights, unique IDs
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for entry in &self.entries {
            if entry.weight == 0 {
                return Err(CatalogError::ZeroWeight {
                    name: entry.name.clone(),
                });
            }
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
        }
        Ok(())
    }

    /// Get entry by ID
    pub fn get(&self, id: SymbolId) -> Option<&SymbolDef> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Check membership
    pub fn contains(&self, id: SymbolId) -> bool {
        self.get(id).is_some()
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[SymbolDef] {
        &self.entries
    }

    /// All symbol IDs in catalog order
    pub fn ids(&self) -> Vec<SymbolId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| e.weight as u64).sum()
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::classic()
    }
}

/// Prepared weighted sampler over a validated catalog
///
/// Built once per engine instance; `pick` is total (no failure modes).
#[derive(Debug, Clone)]
pub struct WeightedSampler {
    ids: Vec<SymbolId>,
    dist: WeightedIndex<u32>,
}

impl WeightedSampler {
    /// Build a sampler, validating the catalog first
    pub fn new(catalog: &SymbolCatalog) -> Result<Self, CatalogError> {
        catalog.validate()?;
        let weights: Vec<u32> = catalog.entries().iter().map(|e| e.weight).collect();
        // Validation guarantees non-empty positive weights
        let dist = WeightedIndex::new(weights).map_err(|_| CatalogError::Empty)?;
        Ok(Self {
            ids: catalog.ids(),
            dist,
        })
    }

    /// Draw one symbol ID according to the weight table
    pub fn pick(&self, rng: &mut impl Rng) -> SymbolId {
        self.ids[self.dist.sample(rng)]
    }
}
