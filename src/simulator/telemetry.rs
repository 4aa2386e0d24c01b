// Global oscillator + bounded sample history, and per-sensor derivation.

use std::collections::VecDeque;

use rand::Rng;

use super::rules::Adjustment;
use crate::error::SimulatorError;
use crate::models::{Reading, Sensor};

pub const DEFAULT_HISTORY_CAPACITY: usize = 30;
pub const DEFAULT_PHASE_STEP: f64 = 0.1;

const BASE_PRESSURE_PSI: f64 = 120.0;
const PRESSURE_AMPLITUDE_PSI: f64 = 5.0;
const PRESSURE_NOISE_PSI: f64 = 0.5;
const BASE_FLOW_LPM: f64 = 50.0;
const FLOW_AMPLITUDE_LPM: f64 = 3.0;
const FLOW_NOISE_LPM: f64 = 0.3;
const BASE_TEMPERATURE_C: f64 = 25.0;
const TEMPERATURE_NOISE_C: f64 = 0.5;
const BASE_VIBRATION_G: f64 = 0.1;
const VIBRATION_NOISE_G: f64 = 0.05;
/// Pressure lost per position step along the pipeline.
pub const DISTANCE_LOSS_PSI: f64 = 0.5;
const CORROSION_NOISE: f64 = 0.001;

/// Per-sensor corrosion jitter, drawn once per sample so reads stay pure.
pub fn draw_corrosion_noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..=CORROSION_NOISE)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorSettings {
    pub history_capacity: usize,
    /// Radians the oscillator advances per tick.
    pub phase_step: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            phase_step: DEFAULT_PHASE_STEP,
        }
    }
}

pub struct TelemetryGenerator {
    settings: GeneratorSettings,
    phase: f64,
    history: VecDeque<Reading>,
}

impl TelemetryGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        let settings = GeneratorSettings {
            history_capacity: settings.history_capacity.max(1),
            ..settings
        };
        Self {
            settings,
            phase: 0.0,
            history: VecDeque::with_capacity(settings.history_capacity),
        }
    }

    /// Produce the next global sample and append it, dropping the oldest once
    /// the history is full.
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> Reading {
        self.phase += self.settings.phase_step;
        let reading = Reading {
            timestamp: now_ms,
            pressure: BASE_PRESSURE_PSI
                + PRESSURE_AMPLITUDE_PSI * self.phase.sin()
                + rng.gen_range(-PRESSURE_NOISE_PSI..=PRESSURE_NOISE_PSI),
            flow: BASE_FLOW_LPM
                + FLOW_AMPLITUDE_LPM * self.phase.cos()
                + rng.gen_range(-FLOW_NOISE_LPM..=FLOW_NOISE_LPM),
            temperature: BASE_TEMPERATURE_C
                + rng.gen_range(-TEMPERATURE_NOISE_C..=TEMPERATURE_NOISE_C),
            vibration: BASE_VIBRATION_G + rng.gen_range(0.0..=VIBRATION_NOISE_G),
            corrosion: 0.0,
        };
        if self.history.len() == self.settings.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(reading);
        reading
    }

    /// Derive `sensor`'s view of the latest sample: distance pressure loss,
    /// then the sensor's adjustment, corrosion from its baseline plus the
    /// noise drawn for this sample.
    pub fn reading(
        &self,
        sensor: &Sensor,
        adjustment: Adjustment,
        corrosion_noise: f64,
    ) -> Result<Reading, SimulatorError> {
        let latest = self.latest().ok_or(SimulatorError::NoSamples)?;
        let corrected = Reading {
            pressure: latest.pressure - sensor.position_index as f64 * DISTANCE_LOSS_PSI,
            corrosion: sensor.corrosion_rate + corrosion_noise,
            ..*latest
        };
        Ok(adjustment.apply(corrected))
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.history.back()
    }

    /// Oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Reading> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

}
