//! Run one spin cycle and print the stage-event stream.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p rw-reels --example spin
//! ```

use rw_reels::SlotEngine;

fn main() {
    env_logger::init();

    let mut engine = SlotEngine::new();
    engine.seed(2024);

    println!("game: {}", engine.config().name);
    println!("paylines: {}", engine.paylines().len());

    engine.request_spin();

    // Drive the logical clock at ~60fps until the overlay has faded out
    let mut t = 0.0;
    while t <= 2500.0 {
        engine.tick(t);
        for event in engine.drain_events() {
            println!("[{:7.1}ms] {}", event.timestamp_ms, event.type_name());
        }
        t += 16.0;
    }

    println!("\nfinal grid:");
    for (col, symbols) in engine.grid().iter().enumerate() {
        let names: Vec<&str> = symbols
            .iter()
            .filter_map(|id| engine.config().catalog.get(*id))
            .map(|def| def.name.as_str())
            .collect();
        println!("  reel {col}: {}", names.join(" | "));
    }
}
