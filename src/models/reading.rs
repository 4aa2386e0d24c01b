// Telemetry samples

use serde::{Deserialize, Serialize};

use super::SensorStatus;

/// One synthetic sample. Units: psi, L/min, °C, g, mm/yr.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub timestamp: u64,
    pub pressure: f64,
    pub flow: f64,
    pub temperature: f64,
    pub vibration: f64,
    pub corrosion: f64,
}

impl Reading {
    pub fn is_finite(&self) -> bool {
        self.pressure.is_finite()
            && self.flow.is_finite()
            && self.temperature.is_finite()
            && self.vibration.is_finite()
            && self.corrosion.is_finite()
    }
}

/// A reading derived for one sensor from the latest global sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub sensor_id: String,
    pub status: SensorStatus,
    #[serde(flatten)]
    pub reading: Reading,
}
