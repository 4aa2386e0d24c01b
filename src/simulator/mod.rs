// Simulator context: owns the generator, the segment tracker, the sensors,
// the clock and the RNG. One writer (the tick worker); no global state.

pub mod aggregate;
pub mod clock;
pub mod rules;
pub mod segments;
pub mod telemetry;
pub mod topology;

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::instrument;

use crate::error::SimulatorError;
use crate::models::{
    Reading, SegmentHealth, Sensor, SensorReading, SystemHealthReport, TelemetrySnapshot,
};
use clock::Clock;
use rules::RuleTable;
use segments::SegmentHealthTracker;
use telemetry::{GeneratorSettings, TelemetryGenerator};
use topology::Topology;

pub use clock::{ManualClock, SystemClock};

pub struct Simulator {
    sensors: Vec<Sensor>,
    rules: RuleTable,
    generator: TelemetryGenerator,
    /// Corrosion jitter for the latest sample, one entry per sensor (same order).
    corrosion_noise: Vec<f64>,
    tracker: SegmentHealthTracker,
    system_health: Option<f64>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    ticks: u64,
}

impl Simulator {
    /// Builds the context and primes the history with one sample, so readings
    /// are available before the first tick.
    pub fn new(
        topology: Topology,
        settings: GeneratorSettings,
        clock: Arc<dyn Clock>,
        rng: StdRng,
    ) -> Self {
        let Topology {
            mut sensors,
            segments,
            rules,
        } = topology;
        let tracker = SegmentHealthTracker::new(segments);
        tracker.refresh_statuses(&mut sensors);
        let system_health = aggregate::system_health(&tracker.values());
        let mut sim = Self {
            sensors,
            rules,
            generator: TelemetryGenerator::new(settings),
            corrosion_noise: Vec::new(),
            tracker,
            system_health,
            clock,
            rng,
            ticks: 0,
        };
        let now = sim.clock.now_ms();
        sim.sample(now);
        sim
    }

    /// New global sample plus this sample's per-sensor corrosion jitter. The
    /// only place the RNG is drawn from, so reads never shift the seeded stream.
    fn sample(&mut self, now_ms: u64) -> Reading {
        let global = self.generator.tick(now_ms, &mut self.rng);
        self.corrosion_noise = self
            .sensors
            .iter()
            .map(|_| telemetry::draw_corrosion_noise(&mut self.rng))
            .collect();
        global
    }

    /// Seeded when `seed` is set, otherwise from OS entropy.
    pub fn with_seed(
        topology: Topology,
        settings: GeneratorSettings,
        clock: Arc<dyn Clock>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(topology, settings, clock, rng)
    }

    /// One simulation step: new global sample, sensor statuses, system health.
    #[instrument(skip(self), fields(operation = "tick", tick = self.ticks + 1))]
    pub fn tick(&mut self) -> TelemetrySnapshot {
        let now = self.clock.now_ms();
        let global = self.sample(now);
        self.tracker.refresh_statuses(&mut self.sensors);
        self.system_health = aggregate::system_health(&self.tracker.values());
        self.ticks += 1;
        TelemetrySnapshot {
            timestamp: now,
            global,
            sensors: self.readings(),
            segments: self.tracker.snapshot(),
            system_health: self.system_health,
        }
    }

    pub fn reading(&self, sensor_id: &str) -> Result<SensorReading, SimulatorError> {
        let index = self
            .sensors
            .iter()
            .position(|s| s.id == sensor_id)
            .ok_or_else(|| SimulatorError::UnknownSensor(sensor_id.to_string()))?;
        self.reading_at(index)
    }

    fn reading_at(&self, index: usize) -> Result<SensorReading, SimulatorError> {
        let sensor = &self.sensors[index];
        let noise = self.corrosion_noise.get(index).copied().unwrap_or(0.0);
        let reading = self
            .generator
            .reading(sensor, self.rules.get(&sensor.id), noise)?;
        Ok(SensorReading {
            sensor_id: sensor.id.clone(),
            status: sensor.status,
            reading,
        })
    }

    /// Every sensor's reading, in pipeline order.
    pub fn readings(&self) -> Vec<SensorReading> {
        (0..self.sensors.len())
            .filter_map(|index| match self.reading_at(index) {
                Ok(reading) => Some(reading),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        sensor = %self.sensors[index].id,
                        "sensor reading unavailable"
                    );
                    None
                }
            })
            .collect()
    }

    /// Current snapshot without advancing the simulation.
    pub fn snapshot(&self) -> Result<TelemetrySnapshot, SimulatorError> {
        let global = self.latest()?;
        Ok(TelemetrySnapshot {
            timestamp: global.timestamp,
            global,
            sensors: self.readings(),
            segments: self.tracker.snapshot(),
            system_health: self.system_health,
        })
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn sensor(&self, sensor_id: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id == sensor_id)
    }

    pub fn latest(&self) -> Result<Reading, SimulatorError> {
        self.generator
            .latest()
            .copied()
            .ok_or(SimulatorError::NoSamples)
    }

    /// Oldest first.
    pub fn history(&self) -> Vec<Reading> {
        self.generator.history().copied().collect()
    }

    pub fn history_len(&self) -> usize {
        self.generator.history_len()
    }

    pub fn segments(&self) -> Vec<SegmentHealth> {
        self.tracker.snapshot()
    }

    /// Overrides a segment's health (clamped to [0, 100]); statuses and system
    /// health follow immediately.
    pub fn set_segment_health(
        &mut self,
        segment_id: &str,
        health: f64,
    ) -> Result<f64, SimulatorError> {
        let stored = self.tracker.set_health(segment_id, health)?;
        self.tracker.refresh_statuses(&mut self.sensors);
        self.system_health = aggregate::system_health(&self.tracker.values());
        Ok(stored)
    }

    pub fn system_health(&self) -> Option<f64> {
        self.system_health
    }

    pub fn health_report(&self) -> SystemHealthReport {
        SystemHealthReport {
            system_health: self.system_health,
            segments: self.tracker.snapshot(),
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
