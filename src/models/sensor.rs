// Sensor identity and derived status

use serde::{Deserialize, Serialize};

/// Sensor status; serializes to lowercase JSON (e.g. "warning").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Normal,
    Warning,
    Critical,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub location: String,
    /// Position along the pipeline, 0 = source. Drives the distance pressure loss.
    pub position_index: u32,
    /// Baseline corrosion rate in mm/yr.
    pub corrosion_rate: f64,
    pub status: SensorStatus,
}
