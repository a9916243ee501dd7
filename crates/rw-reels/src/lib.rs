//! # rw-reels — ReelWorks Reel-Spin Simulation Engine
//!
//! A headless slot-machine spin engine: weighted symbol draws, per-reel
//! scroll/settle sequencing with staggered stops, and payline overlay
//! flashing. Hosts render from read-only state and the stage-event
//! stream; the engine owns no pixels and no wall clock.
//!
//! ## Architecture
//!
//! ```text
//! SlotEngine
//!     │
//!     ├── EngineConfig (grid, catalog, paylines, timing)
//!     ├── WeightedSampler (symbol draws)
//!     ├── Scheduler (prioritized timer queue)
//!     ├── Reel × N (visible slots + transient SpinRun)
//!     └── OverlayController (payline flash/fade)
//!           │
//!           v
//!     tick(now_ms) → Vec<StageEvent> + motion queries
//! ```
//!
//! One spin: `request_spin` guards on `Idle`, enters `Spinning`, and
//! schedules each column's scroll at `column * stagger`. As each scroll
//! completes the reel's slots are replaced all at once (the outcome) and
//! a cosmetic bounce plays. Once every reel is past its scroll the
//! paylines flash and the engine is `Idle` again.

pub mod config;
pub mod easing;
pub mod engine;
pub mod overlay;
pub mod paylines;
pub mod reel;
pub mod schedule;
pub mod symbols;
pub mod timing;

pub use config::*;
pub use engine::*;
pub use overlay::*;
pub use paylines::*;
pub use reel::*;
pub use symbols::*;
pub use timing::*;
