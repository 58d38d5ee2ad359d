//! Quick Start Example
//!
//! Runs the radar pipeline against the built-in sweep simulator for a few
//! seconds and prints each threat-tier change.
//!
//! Run with `cargo run -p radar_core --example quick_start`.

use radar_core::pipeline::{self, RunParams};
use radar_core::types::ThreatTier;
use radar_hardware::{ConsoleAudio, SimulatedSource};
use std::sync::atomic::AtomicBool;

fn main() -> Result<(), eyre::Report> {
    let params = RunParams {
        // ~5 seconds at the default 16 ms tick
        max_ticks: Some(300),
        ..RunParams::default()
    };

    let shutdown = AtomicBool::new(false);
    let mut last_tier = ThreatTier::Normal;

    pipeline::run(
        SimulatedSource::new(),
        ConsoleAudio,
        params,
        &shutdown,
        |snap| {
            if snap.state.tier != last_tier {
                println!(
                    "{:?} -> {:?} at bearing {:.1} deg, distance {:.1}",
                    last_tier, snap.state.tier, snap.state.angle, snap.state.smoothed_distance
                );
                last_tier = snap.state.tier;
            }
        },
    )?;

    println!("done: last tier {last_tier:?}");
    Ok(())
}
