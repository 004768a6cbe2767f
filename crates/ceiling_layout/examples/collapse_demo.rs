//! Headless collapse demo
//!
//! Drives a ceiling container through a drag and a fling without any
//! rendering, printing the offset trace. Useful for eyeballing the scroll
//! feel constants.
//!
//! Run with: cargo run -p ceiling_layout --example collapse_demo

use std::sync::{Arc, Mutex};

use ceiling_animation::{AnimationScheduler, FlingConfig};
use ceiling_core::events::{TouchEvent, TouchPhase};
use ceiling_layout::{CeilingConfig, CeilingLayout, ChildSpec, ConfigError, TouchConfig};

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let mut layout = CeilingLayout::with_touch_config(
        CeilingConfig::new(1).offset_allowance(20),
        TouchConfig::default(),
        FlingConfig::default(),
    );
    layout.set_scheduler(&scheduler);
    layout.on_ceiling_scroll(|ceiling, scale| {
        tracing::info!(ceiling, scale, "ceiling progress");
    });

    let children = [ChildSpec::new(300), ChildSpec::new(56), ChildSpec::new(900)];
    let geometry = layout.measure(&children, 800)?.unwrap();
    tracing::info!(?geometry, "measured");

    // A quick upward drag followed by a release with momentum
    let mut y = 1200;
    let mut t = 0.0;
    layout.handle_touch(TouchEvent::new(TouchPhase::Down, 0, y, t));
    for _ in 0..8 {
        y -= 15;
        t += 16.0;
        layout.handle_touch(TouchEvent::new(TouchPhase::Move, 0, y, t));
        println!("drag    offset={:>3}", layout.offset());
    }
    layout.handle_touch(TouchEvent::new(TouchPhase::Up, 0, y, t));

    while {
        scheduler.lock().unwrap().tick(0.016);
        layout.tick()
    } {
        println!("fling   offset={:>3}", layout.offset());
    }
    let (ceiling, scale) = layout.ceiling_state();
    println!("settled offset={} ceiling={ceiling} scale={scale:.2}", layout.offset());
    Ok(())
}
