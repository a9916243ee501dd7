//! Timing profiles for spin sequencing

use serde::{Deserialize, Serialize};

/// Timing profile for spin motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingProfile {
    /// Normal gameplay timing
    Normal,
    /// Fast/Turbo mode
    Turbo,
    /// Studio mode (near-instant for testing)
    Studio,
    /// Custom timing multiplier
    Custom,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// One settle-bounce sub-step: ease to `target_rows`, then the next step
/// takes over. The final step targets 0.0 (resting position).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceStep {
    /// Vertical offset target in row units (positive = below rest)
    pub target_rows: f64,
    /// Step duration (ms)
    pub duration_ms: f64,
}

impl BounceStep {
    pub fn new(target_rows: f64, duration_ms: f64) -> Self {
        Self {
            target_rows,
            duration_ms,
        }
    }
}

/// Detailed timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Scroll duration per reel (ms)
    pub spin_duration_ms: f64,

    /// Per-column start delay increment (ms)
    pub stagger_ms: f64,

    /// Extra symbols generated per reel per spin for scroll motion
    pub run_length: u8,

    /// Settle-bounce steps, decreasing amplitude, last target 0.0
    pub settle_bounce: Vec<BounceStep>,

    /// Overlay hold at full visibility before fading (ms)
    pub flash_hold_ms: f64,

    /// Overlay fade-out duration (ms)
    pub flash_fade_ms: f64,
}

impl TimingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            spin_duration_ms: 800.0,
            stagger_ms: 80.0,
            run_length: 12,
            settle_bounce: vec![
                BounceStep::new(0.12, 150.0),
                BounceStep::new(-0.08, 120.0),
                BounceStep::new(0.04, 100.0),
                BounceStep::new(0.0, 80.0),
            ],
            flash_hold_ms: 500.0,
            flash_fade_ms: 1000.0,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            spin_duration_ms: 400.0,
            stagger_ms: 40.0,
            run_length: 8,
            settle_bounce: vec![
                BounceStep::new(0.10, 80.0),
                BounceStep::new(-0.05, 60.0),
                BounceStep::new(0.0, 40.0),
            ],
            flash_hold_ms: 250.0,
            flash_fade_ms: 500.0,
        }
    }

    /// Studio mode (near-instant, for deterministic tests)
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            spin_duration_ms: 50.0,
            stagger_ms: 10.0,
            run_length: 3,
            settle_bounce: vec![BounceStep::new(0.05, 10.0), BounceStep::new(0.0, 10.0)],
            flash_hold_ms: 20.0,
            flash_fade_ms: 30.0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale all durations by factor (< 1.0 = faster); offsets unchanged
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: TimingProfile::Custom,
            spin_duration_ms: self.spin_duration_ms * factor,
            stagger_ms: self.stagger_ms * factor,
            run_length: self.run_length,
            settle_bounce: self
                .settle_bounce
                .iter()
                .map(|s| BounceStep::new(s.target_rows, s.duration_ms * factor))
                .collect(),
            flash_hold_ms: self.flash_hold_ms * factor,
            flash_fade_ms: self.flash_fade_ms * factor,
        }
    }

    /// Scroll start time for a column, relative to spin accept
    pub fn reel_start_time(&self, column: u8) -> f64 {
        column as f64 * self.stagger_ms
    }

    /// Scroll completion time for a column, relative to spin accept
    pub fn reel_stop_time(&self, column: u8) -> f64 {
        self.reel_start_time(column) + self.spin_duration_ms
    }

    /// Time until the last reel finishes scrolling
    pub fn total_spin_duration(&self, reel_count: u8) -> f64 {
        if reel_count == 0 {
            return 0.0;
        }
        self.reel_stop_time(reel_count - 1)
    }

    /// Total settle-bounce duration
    pub fn settle_total_ms(&self) -> f64 {
        self.settle_bounce.iter().map(|s| s.duration_ms).sum()
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}
