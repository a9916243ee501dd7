//! Overlay controller — payline highlight flash and fade
//!
//! Highlighting is cosmetic and unconditional: every completed spin
//! flashes the full payline set, never a filtered subset.

use crate::easing::Easing;

/// Controls payline-highlight visibility over time
///
/// `flash` snaps alpha to fully visible; after a fixed hold the alpha
/// fades to zero over a fixed duration. Stateless between flashes.
#[derive(Debug, Clone)]
pub struct OverlayController {
    hold_ms: f64,
    fade_ms: f64,
    flash_started_ms: Option<f64>,
}

impl OverlayController {
    /// Create with hold and fade durations
    pub fn new(hold_ms: f64, fade_ms: f64) -> Self {
        Self {
            hold_ms,
            fade_ms,
            flash_started_ms: None,
        }
    }

    /// Trigger a flash at `now_ms`
    pub fn flash(&mut self, now_ms: f64) {
        self.flash_started_ms = Some(now_ms);
    }

    /// Cancel any active flash
    pub fn reset(&mut self) {
        self.flash_started_ms = None;
    }

    /// Timestamp at which the current flash becomes fully transparent
    pub fn hidden_at(&self) -> Option<f64> {
        self.flash_started_ms
            .map(|t0| t0 + self.hold_ms + self.fade_ms)
    }

    /// Highlight alpha at `now_ms`: 1.0 during hold, sine fade to 0.0
    pub fn alpha(&self, now_ms: f64) -> f64 {
        let Some(t0) = self.flash_started_ms else {
            return 0.0;
        };
        let dt = now_ms - t0;
        if dt < 0.0 {
            return 0.0;
        }
        if dt < self.hold_ms {
            return 1.0;
        }
        let fade_t = (dt - self.hold_ms) / self.fade_ms;
        if fade_t >= 1.0 {
            0.0
        } else {
            1.0 - Easing::SineOut.apply(fade_t)
        }
    }

    /// Whether the overlay is at all visible at `now_ms`
    pub fn is_visible(&self, now_ms: f64) -> bool {
        self.alpha(now_ms) > 0.0
    }
}
