//! Stage — The core enum defining all canonical spin phases
//!
//! A Stage is NOT an animation frame and NOT an engine-internal action.
//! A Stage is the SEMANTIC MEANING of a moment in the spin flow.

use serde::{Deserialize, Serialize};

/// Canonical spin stage — the universal language of one reel-spin cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Spin trigger accepted, cycle initiated
    SpinStart,

    /// Single reel starts its scroll motion (after its stagger delay)
    ReelSpinningStart {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    /// Reel scroll finished, final resting symbols fixed
    ReelStop {
        /// Which reel stopped (0-indexed)
        reel_index: u8,
        /// Symbols on this reel (top to bottom)
        #[serde(default)]
        symbols: Vec<u32>,
    },

    /// Reel settle-bounce finished (cosmetic, may trail SpinEnd)
    ReelSettled {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    /// Spin complete, engine idle again, ready for next spin
    SpinEnd,

    // ═══════════════════════════════════════════════════════════════════════
    // PRESENTATION
    // ═══════════════════════════════════════════════════════════════════════
    /// Payline overlay shown at full visibility
    PaylinesShow {
        /// Number of paylines in the overlay
        #[serde(default)]
        line_count: u8,
    },

    /// Payline overlay fully faded out
    PaylinesHidden,
}

/// Coarse grouping of stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageCategory {
    /// Stages that drive or gate the spin state machine
    SpinLifecycle,
    /// Purely cosmetic stages (overlay, trailing bounce)
    Presentation,
}

impl Stage {
    /// Stable type name (matches serde tag)
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::SpinStart => "spin_start",
            Stage::ReelSpinningStart { .. } => "reel_spinning_start",
            Stage::ReelStop { .. } => "reel_stop",
            Stage::ReelSettled { .. } => "reel_settled",
            Stage::SpinEnd => "spin_end",
            Stage::PaylinesShow { .. } => "paylines_show",
            Stage::PaylinesHidden => "paylines_hidden",
        }
    }

    /// Category of this stage
    pub fn category(&self) -> StageCategory {
        match self {
            Stage::SpinStart
            | Stage::ReelSpinningStart { .. }
            | Stage::ReelStop { .. }
            | Stage::SpinEnd => StageCategory::SpinLifecycle,
            Stage::ReelSettled { .. } | Stage::PaylinesShow { .. } | Stage::PaylinesHidden => {
                StageCategory::Presentation
            }
        }
    }

    /// Reel index if this stage is reel-scoped
    pub fn reel_index(&self) -> Option<u8> {
        match self {
            Stage::ReelSpinningStart { reel_index }
            | Stage::ReelStop { reel_index, .. }
            | Stage::ReelSettled { reel_index } => Some(*reel_index),
            _ => None,
        }
    }
}
