//! # rw-stage — ReelWorks Stage System
//!
//! Defines the canonical phases of one reel-spin cycle.
//! Hosts (renderers, audio layers) never consume raw engine internals —
//! only STAGES with timestamps.
//!
//! ## Philosophy
//!
//! Every spin, regardless of grid size or timing profile, passes through
//! the same semantic phases:
//! - Spin starts → reels stop one by one → paylines flash → spin ends
//!
//! This crate defines those stages and the timed event/trace containers.

pub mod event;
pub mod stage;
pub mod trace;

pub use event::*;
pub use stage::*;
pub use trace::*;
