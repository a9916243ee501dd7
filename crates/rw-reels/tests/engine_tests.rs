//! Integration tests for the full spin cycle under normal timing
//!
//! Drives the engine's logical clock through the reference timeline:
//! stagger 80ms, scroll 800ms, three reels — stops at t=800/880/960.

use rw_reels::{EngineConfig, EngineState, ReelPhase, SlotEngine};
use rw_stage::StageTrace;

fn engine(seed: u64) -> SlotEngine {
    let mut engine = SlotEngine::with_config(EngineConfig::default()).unwrap();
    engine.seed(seed);
    engine
}

#[test]
fn reference_timeline() {
    let mut engine = engine(1);

    assert!(engine.request_spin());
    assert_eq!(engine.state(), EngineState::Spinning);

    // Just before the first reel stops: still spinning, nothing settled
    engine.tick(799.0);
    assert_eq!(engine.state(), EngineState::Spinning);
    assert_eq!(engine.reel_phase(0), Some(ReelPhase::Scrolling));

    // Column 0 completes at 800, column 1 at 880
    engine.tick(800.0);
    assert_eq!(engine.reel_phase(0), Some(ReelPhase::Settling));
    assert_eq!(engine.reel_phase(1), Some(ReelPhase::Scrolling));
    assert_eq!(engine.state(), EngineState::Spinning);

    engine.tick(880.0);
    assert_eq!(engine.reel_phase(1), Some(ReelPhase::Settling));
    assert_eq!(engine.state(), EngineState::Spinning);

    // Column 2 completes at 960: engine idle again
    engine.tick(959.0);
    assert_eq!(engine.state(), EngineState::Spinning);
    engine.tick(960.0);
    assert_eq!(engine.state(), EngineState::Idle);

    // Event timestamps carry the exact schedule even under coarse ticks
    let events = engine.drain_events();
    let stop_times: Vec<f64> = events
        .iter()
        .filter(|e| e.type_name() == "reel_stop")
        .map(|e| e.timestamp_ms)
        .collect();
    assert_eq!(stop_times, vec![800.0, 880.0, 960.0]);

    let end = events.iter().find(|e| e.type_name() == "spin_end").unwrap();
    assert_eq!(end.timestamp_ms, 960.0);
}

#[test]
fn spin_while_spinning_is_a_no_op() {
    let mut engine = engine(2);
    assert!(engine.request_spin());

    engine.tick(500.0);
    let grid_before = engine.grid();
    assert!(!engine.request_spin());
    assert_eq!(engine.grid(), grid_before);
    assert_eq!(engine.spin_count(), 1);

    // Timers were not restarted: reel 0 still stops at t=800
    engine.tick(2000.0);
    let events = engine.drain_events();
    let first_stop = events
        .iter()
        .find(|e| e.type_name() == "reel_stop")
        .unwrap();
    assert_eq!(first_stop.timestamp_ms, 800.0);
}

#[test]
fn spin_after_completion_is_accepted() {
    let mut engine = engine(3);
    assert!(engine.request_spin());
    engine.tick(960.0);
    assert!(engine.is_idle());
    engine.drain_events();

    engine.tick(961.0);
    assert!(engine.request_spin());
    engine.tick(961.0 + 960.0);
    assert!(engine.is_idle());

    // A full second cycle was produced
    let events = engine.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| e.type_name() == "reel_stop")
            .count(),
        3
    );
    assert_eq!(engine.spin_count(), 2);
}

#[test]
fn slot_counts_invariant_throughout() {
    let mut engine = engine(4);
    engine.request_spin();

    let mut t = 0.0;
    while t <= 2000.0 {
        engine.tick(t);
        for reel in engine.reels() {
            assert_eq!(reel.rows(), 3);
        }
        t += 37.0; // deliberately not aligned to the schedule
    }
    assert!(engine.is_idle());
}

#[test]
fn settled_symbols_always_from_catalog() {
    let mut engine = engine(5);
    let catalog = engine.config().catalog.clone();

    for spin in 0..20 {
        let base = spin as f64 * 3000.0;
        engine.tick(base);
        assert!(engine.request_spin());
        engine.tick(base + 2500.0);
        assert!(engine.is_idle());

        for column in engine.grid() {
            for id in column {
                assert!(catalog.contains(id), "foreign symbol {id:?}");
            }
        }
    }
}

#[test]
fn event_stream_is_monotonic_and_ordered() {
    let mut engine = engine(6);
    engine.request_spin();
    engine.tick(5000.0);

    let mut trace = StageTrace::new("t-1", "classic_3x3");
    trace.extend(engine.drain_events());
    assert!(trace.is_monotonic());

    // One of each lifecycle marker, in order
    let names: Vec<&str> = trace.events.iter().map(|e| e.type_name()).collect();
    let spin_start = names.iter().position(|n| *n == "spin_start").unwrap();
    let spin_end = names.iter().position(|n| *n == "spin_end").unwrap();
    let show = names.iter().position(|n| *n == "paylines_show").unwrap();
    let hidden = names.iter().position(|n| *n == "paylines_hidden").unwrap();
    assert!(spin_start < spin_end);
    assert!(show <= spin_end + 1 && show > spin_start);
    assert!(hidden > show);

    // Last reel to stop is always the last column
    let last_stop = trace
        .events_by_type("reel_stop")
        .last()
        .map(|e| e.stage.reel_index())
        .unwrap();
    assert_eq!(last_stop, Some(2));
}

#[test]
fn overlay_flashes_then_fades() {
    let mut engine = engine(7);
    engine.request_spin();

    engine.tick(960.0);
    assert_eq!(engine.overlay_alpha(), 1.0);

    // Held fully visible for 500ms, then fading
    engine.tick(1459.0);
    assert_eq!(engine.overlay_alpha(), 1.0);
    engine.tick(1700.0);
    let mid = engine.overlay_alpha();
    assert!(mid > 0.0 && mid < 1.0, "mid-fade alpha {mid}");

    // Fully hidden at 960 + 500 + 1000
    engine.tick(2460.0);
    assert_eq!(engine.overlay_alpha(), 0.0);
    let events = engine.drain_events();
    let hidden = events
        .iter()
        .find(|e| e.type_name() == "paylines_hidden")
        .unwrap();
    assert_eq!(hidden.timestamp_ms, 2460.0);
}

#[test]
fn bounce_trails_idle_but_never_touches_slots() {
    let mut engine = engine(8);
    engine.request_spin();
    engine.tick(960.0);
    assert!(engine.is_idle());

    // Reel 2 settled its outcome at 960; its bounce is still playing
    let outcome = engine.reel(2).unwrap().slots().to_vec();
    assert_eq!(engine.reel_phase(2), Some(ReelPhase::Settling));

    engine.tick(1100.0);
    assert!(engine.bounce_offset(2).abs() > 0.0);
    assert_eq!(engine.reel(2).unwrap().slots(), outcome.as_slice());

    // Bounce total is 450ms; reel 2 rests at 1410
    engine.tick(1410.0);
    assert_eq!(engine.reel_phase(2), Some(ReelPhase::Rested));
    assert_eq!(engine.bounce_offset(2), 0.0);
    assert_eq!(engine.reel(2).unwrap().slots(), outcome.as_slice());
}

#[test]
fn scroll_offset_spans_run_length() {
    let mut engine = engine(9);
    engine.request_spin();
    engine.tick(0.0);

    assert_eq!(engine.scroll_offset(0), 0.0);
    // Reel 2 has not started yet (stagger 160ms)
    assert_eq!(engine.scroll_offset(2), 0.0);

    engine.tick(400.0);
    let offset = engine.scroll_offset(0);
    let run_rows = engine.config().timing.run_length as f64;
    assert!(offset > 0.0 && offset < run_rows);
}
