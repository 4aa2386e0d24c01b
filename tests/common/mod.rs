// Shared test helpers

#![allow(dead_code)]

use leakwatch::simulator::telemetry::GeneratorSettings;
use leakwatch::simulator::topology::Topology;
use leakwatch::simulator::{ManualClock, Simulator};
use std::sync::Arc;

pub const START_MS: u64 = 1_700_000_000_000;

/// Default topology, seeded RNG, clock pinned at START_MS.
pub fn seeded_simulator(seed: u64) -> (Simulator, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START_MS));
    let sim = Simulator::with_seed(
        Topology::default(),
        GeneratorSettings::default(),
        clock.clone(),
        Some(seed),
    );
    (sim, clock)
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
