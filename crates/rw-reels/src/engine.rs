//! Spin sequencer — the engine's central state machine
//!
//! Drives one spin cycle across all reels: staggered scroll starts, fixed
//! scroll durations, per-reel settle-bounce, overlay flash, and the
//! idle/spinning re-entrancy guard. All motion runs on a logical clock in
//! milliseconds advanced by `tick`; the engine never blocks and never
//! samples wall time.

use std::sync::Arc;

use log::{debug, trace};
use parking_lot::{Mutex, MutexGuard};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use rw_stage::{Stage, StageEvent};

use crate::config::{ConfigError, EngineConfig};
use crate::easing::{Easing, ease};
use crate::overlay::OverlayController;
use crate::paylines::Payline;
use crate::reel::{Reel, SpinRun};
use crate::schedule::{Action, Scheduler};
use crate::symbols::{SymbolId, WeightedSampler};

/// Engine-wide spin state
///
/// Owned per instance — multiple engines coexist without cross-talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// Ready to accept a spin request
    Idle,
    /// A spin cycle is in flight; requests are ignored
    Spinning,
}

/// Per-reel animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReelPhase {
    /// Scroll motion in progress (or waiting on the stagger delay)
    Scrolling,
    /// Outcome fixed, cosmetic bounce playing
    Settling,
    /// At rest
    Rested,
}

/// Active scroll motion window for one reel
#[derive(Debug, Clone, Copy)]
struct ScrollWindow {
    start_ms: f64,
    duration_ms: f64,
    run_rows: f64,
}

/// Reel-spin simulation engine for one slot-machine instance
pub struct SlotEngine {
    config: EngineConfig,
    sampler: WeightedSampler,
    reels: Vec<Reel>,
    runs: Vec<Option<SpinRun>>,
    phases: Vec<ReelPhase>,
    scrolls: Vec<Option<ScrollWindow>>,
    settles: Vec<Option<f64>>,
    state: EngineState,
    scheduler: Scheduler,
    overlay: OverlayController,
    rng: StdRng,
    now_ms: f64,
    events: Vec<StageEvent>,
    spin_count: u64,
}

impl SlotEngine {
    /// Create with the classic 3×3 configuration
    pub fn new() -> Self {
        match Self::with_config(EngineConfig::default()) {
            Ok(engine) => engine,
            Err(_) => unreachable!("default config is valid"),
        }
    }

    /// Create with a specific, validated configuration
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let sampler = WeightedSampler::new(&config.catalog)?;
        let mut rng = StdRng::from_os_rng();

        let reel_count = config.grid.reels as usize;
        let reels = (0..config.grid.reels)
            .map(|c| Reel::fill(c, config.grid.rows, &sampler, &mut rng))
            .collect();
        let overlay =
            OverlayController::new(config.timing.flash_hold_ms, config.timing.flash_fade_ms);

        Ok(Self {
            sampler,
            reels,
            runs: vec![None; reel_count],
            phases: vec![ReelPhase::Rested; reel_count],
            scrolls: vec![None; reel_count],
            settles: vec![None; reel_count],
            state: EngineState::Idle,
            scheduler: Scheduler::new(),
            overlay,
            rng,
            now_ms: 0.0,
            events: Vec::new(),
            spin_count: 0,
            config,
        })
    }

    /// Seed RNG for reproducible outcomes
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN TRIGGER
    // ═══════════════════════════════════════════════════════════════════════

    /// Request a spin
    ///
    /// Returns `false` without any observable change when a spin is
    /// already in flight (UI debounce, not a fault). On accept, entering
    /// `Spinning` is the very first effect.
    pub fn request_spin(&mut self) -> bool {
        if self.state != EngineState::Idle {
            debug!("spin request ignored: engine busy");
            return false;
        }
        self.state = EngineState::Spinning;
        self.spin_count += 1;
        debug!(
            "spin {} accepted at t={:.0}ms",
            self.spin_count, self.now_ms
        );

        // Drop trailing cosmetic actions from the previous cycle
        self.scheduler.clear();
        self.overlay.reset();

        self.events
            .push(StageEvent::new(Stage::SpinStart, self.now_ms));

        let run_length = self.config.timing.run_length;
        for col in 0..self.config.grid.reels {
            let idx = col as usize;
            self.runs[idx] = Some(SpinRun::generate(run_length, &self.sampler, &mut self.rng));
            self.phases[idx] = ReelPhase::Scrolling;
            self.settles[idx] = None;

            let start = self.now_ms + self.config.timing.reel_start_time(col);
            let stop = start + self.config.timing.spin_duration_ms;
            trace!("reel {col}: scroll {start:.0}ms..{stop:.0}ms");
            self.scheduler.schedule(start, Action::StartScroll { column: col });
            self.scheduler.schedule(stop, Action::FinishScroll { column: col });
        }
        true
    }

    /// Advance the logical clock and fire all due actions
    pub fn tick(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        while let Some((due_ms, action)) = self.scheduler.pop_due(self.now_ms) {
            self.dispatch(due_ms, action);
        }
    }

    fn dispatch(&mut self, due_ms: f64, action: Action) {
        match action {
            Action::StartScroll { column } => {
                let idx = column as usize;
                let run_rows = self.runs[idx].as_ref().map_or(0, SpinRun::len) as f64;
                self.scrolls[idx] = Some(ScrollWindow {
                    start_ms: due_ms,
                    duration_ms: self.config.timing.spin_duration_ms,
                    run_rows,
                });
                self.events.push(StageEvent::new(
                    Stage::ReelSpinningStart { reel_index: column },
                    due_ms,
                ));
            }
            Action::FinishScroll { column } => self.finish_scroll(column, due_ms),
            Action::SettleDone { column } => {
                let idx = column as usize;
                self.settles[idx] = None;
                self.phases[idx] = ReelPhase::Rested;
                self.events.push(StageEvent::new(
                    Stage::ReelSettled { reel_index: column },
                    due_ms,
                ));
            }
            Action::OverlayHidden => {
                self.events
                    .push(StageEvent::new(Stage::PaylinesHidden, due_ms));
            }
        }
    }

    fn finish_scroll(&mut self, column: u8, due_ms: f64) {
        let idx = column as usize;

        // Discard the transient run; the fresh slots are the outcome
        self.runs[idx] = None;
        self.scrolls[idx] = None;
        self.reels[idx].replace_all(&self.sampler, &mut self.rng);
        self.phases[idx] = ReelPhase::Settling;
        self.settles[idx] = Some(due_ms);
        self.scheduler.schedule(
            due_ms + self.config.timing.settle_total_ms(),
            Action::SettleDone { column },
        );

        let symbols = self.reels[idx].slots().iter().map(|s| s.0).collect();
        self.events.push(StageEvent::new(
            Stage::ReelStop {
                reel_index: column,
                symbols,
            },
            due_ms,
        ));
        debug!("reel {column} stopped at t={due_ms:.0}ms");

        // Idle rule: every reel past its scroll releases the lock.
        // Cosmetic bounce does not gate; it never touches reel contents.
        let all_scrolled = self.phases.iter().all(|p| *p != ReelPhase::Scrolling);
        if all_scrolled {
            self.overlay.flash(due_ms);
            self.events.push(StageEvent::new(
                Stage::PaylinesShow {
                    line_count: self.config.paylines.len() as u8,
                },
                due_ms,
            ));
            if let Some(hidden_at) = self.overlay.hidden_at() {
                self.scheduler.schedule(hidden_at, Action::OverlayHidden);
            }
            self.state = EngineState::Idle;
            self.events.push(StageEvent::new(Stage::SpinEnd, due_ms));
            debug!("spin {} complete at t={due_ms:.0}ms", self.spin_count);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // OBSERVABILITY
    // ═══════════════════════════════════════════════════════════════════════

    /// Current engine state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether a spin would currently be accepted
    pub fn is_idle(&self) -> bool {
        self.state == EngineState::Idle
    }

    /// Current logical clock (ms)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of accepted spins so far
    pub fn spin_count(&self) -> u64 {
        self.spin_count
    }

    /// All reels, by column
    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    /// One reel, if the column exists
    pub fn reel(&self, column: u8) -> Option<&Reel> {
        self.reels.get(column as usize)
    }

    /// Current grid as columns of symbol IDs
    pub fn grid(&self) -> Vec<Vec<SymbolId>> {
        self.reels.iter().map(|r| r.slots().to_vec()).collect()
    }

    /// Animation phase of one reel
    pub fn reel_phase(&self, column: u8) -> Option<ReelPhase> {
        self.phases.get(column as usize).copied()
    }

    /// Transient spin run for one reel, while scrolling
    pub fn spin_run(&self, column: u8) -> Option<&SpinRun> {
        self.runs.get(column as usize).and_then(|r| r.as_ref())
    }

    /// Payline table
    pub fn paylines(&self) -> &[Payline] {
        &self.config.paylines
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Drain pending stage events in chronological order
    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // MOTION QUERIES
    // ═══════════════════════════════════════════════════════════════════════

    /// Scroll offset of one reel in row units at the current clock
    ///
    /// Eased over the scroll window; 0.0 outside of it. The host moves
    /// the run-plus-slots strip down by this amount inside its mask.
    pub fn scroll_offset(&self, column: u8) -> f64 {
        let Some(window) = self.scrolls.get(column as usize).copied().flatten() else {
            return 0.0;
        };
        let t = if window.duration_ms <= 0.0 {
            1.0
        } else {
            (self.now_ms - window.start_ms) / window.duration_ms
        };
        Easing::QuadOut.apply(t) * window.run_rows
    }

    /// Settle-bounce offset of one reel in row units at the current clock
    ///
    /// Piecewise eased through the configured bounce steps; 0.0 when the
    /// reel is not settling.
    pub fn bounce_offset(&self, column: u8) -> f64 {
        let Some(start_ms) = self.settles.get(column as usize).copied().flatten() else {
            return 0.0;
        };
        let mut step_start = start_ms;
        let mut prev_target = 0.0;
        for step in &self.config.timing.settle_bounce {
            let step_end = step_start + step.duration_ms;
            if self.now_ms < step_end {
                let t = if step.duration_ms <= 0.0 {
                    1.0
                } else {
                    (self.now_ms - step_start) / step.duration_ms
                };
                return ease(prev_target, step.target_rows, t, Easing::SineOut);
            }
            prev_target = step.target_rows;
            step_start = step_end;
        }
        0.0
    }

    /// Payline overlay alpha at the current clock
    pub fn overlay_alpha(&self) -> f64 {
        self.overlay.alpha(self.now_ms)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════

    /// Export config as JSON
    pub fn export_config(&self) -> String {
        self.config.to_json()
    }
}

impl Default for SlotEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe engine handle for multi-threaded hosts
///
/// Serializes all access so the at-most-one-spin-in-flight invariant
/// holds when trigger and tick arrive from different threads.
#[derive(Clone)]
pub struct SharedSlotEngine {
    inner: Arc<Mutex<SlotEngine>>,
}

impl SharedSlotEngine {
    /// Wrap an engine
    pub fn new(engine: SlotEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Request a spin (see [`SlotEngine::request_spin`])
    pub fn request_spin(&self) -> bool {
        self.inner.lock().request_spin()
    }

    /// Advance the clock and fire due actions
    pub fn tick(&self, now_ms: f64) {
        self.inner.lock().tick(now_ms);
    }

    /// Current engine state
    pub fn state(&self) -> EngineState {
        self.inner.lock().state()
    }

    /// Lock for arbitrary access
    pub fn lock(&self) -> MutexGuard<'_, SlotEngine> {
        self.inner.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn studio_engine(seed: u64) -> SlotEngine {
        let mut engine = SlotEngine::with_config(EngineConfig::studio()).unwrap();
        engine.seed(seed);
        engine
    }

    fn run_to_idle(engine: &mut SlotEngine, step_ms: f64, max_ms: f64) {
        let start = engine.now_ms();
        let mut t = start;
        while !engine.is_idle() && t < start + max_ms {
            t += step_ms;
            engine.tick(t);
        }
        assert!(engine.is_idle(), "engine did not return to idle");
    }

    #[test]
    fn test_engine_creation() {
        let engine = SlotEngine::new();
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.reels().len(), 3);
        assert_eq!(engine.spin_count(), 0);
        for reel in engine.reels() {
            assert_eq!(reel.rows(), 3);
        }
    }

    #[test]
    fn test_spin_guard() {
        let mut engine = studio_engine(1);
        assert!(engine.request_spin());
        assert_eq!(engine.state(), EngineState::Spinning);

        // Second request while spinning is a silent no-op
        let grid_before = engine.grid();
        assert!(!engine.request_spin());
        assert_eq!(engine.grid(), grid_before);
        assert_eq!(engine.spin_count(), 1);
    }

    #[test]
    fn test_spin_cycle_returns_to_idle() {
        let mut engine = studio_engine(2);
        assert!(engine.request_spin());
        run_to_idle(&mut engine, 5.0, 1000.0);
        assert!(engine.request_spin());
    }

    #[test]
    fn test_spin_runs_discarded_after_settle() {
        let mut engine = studio_engine(3);
        engine.request_spin();
        assert!(engine.spin_run(0).is_some());
        run_to_idle(&mut engine, 5.0, 1000.0);
        for col in 0..3 {
            assert!(engine.spin_run(col).is_none());
        }
    }

    #[test]
    fn test_last_reel_stops_last() {
        let mut engine = studio_engine(4);
        engine.request_spin();
        run_to_idle(&mut engine, 1.0, 1000.0);

        let events = engine.drain_events();
        let stops: Vec<u8> = events
            .iter()
            .filter_map(|e| match e.stage {
                Stage::ReelStop { reel_index, .. } => Some(reel_index),
                _ => None,
            })
            .collect();
        assert_eq!(stops, vec![0, 1, 2]);
    }

    #[test]
    fn test_outcome_symbols_from_catalog() {
        let mut engine = studio_engine(5);
        engine.request_spin();
        run_to_idle(&mut engine, 5.0, 1000.0);

        let catalog = engine.config().catalog.clone();
        for column in engine.grid() {
            for id in column {
                assert!(catalog.contains(id));
            }
        }
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = studio_engine(99);
        let mut b = studio_engine(99);
        a.request_spin();
        b.request_spin();
        run_to_idle(&mut a, 5.0, 1000.0);
        run_to_idle(&mut b, 5.0, 1000.0);
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_overlay_flashes_on_completion() {
        let mut engine = studio_engine(6);
        engine.request_spin();

        let total = engine.config().timing.total_spin_duration(3);
        engine.tick(total);
        assert!(engine.is_idle());
        assert_eq!(engine.overlay_alpha(), 1.0);
    }

    #[test]
    fn test_scroll_offset_monotonic_during_scroll() {
        let mut engine = studio_engine(7);
        engine.request_spin();

        let duration = engine.config().timing.spin_duration_ms;
        engine.tick(0.0);
        let mut prev = engine.scroll_offset(0);
        for i in 1..10 {
            engine.tick(duration * i as f64 / 10.0 * 0.99);
            let offset = engine.scroll_offset(0);
            assert!(offset >= prev);
            prev = offset;
        }
    }

    #[test]
    fn test_shared_engine() {
        let shared = SharedSlotEngine::new(studio_engine(8));
        assert!(shared.request_spin());
        assert!(!shared.request_spin());
        shared.tick(10_000.0);
        assert_eq!(shared.state(), EngineState::Idle);
    }
}
