// Payload accepted by the external leak inference endpoint (POST /leak/stream).
// That service speaks snake_case JSON, unlike the rest of this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SensorReading;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub pressure_psi: f64,
    pub flow_rate_lpm: f64,
    pub temperature_c: f64,
    pub vibration_gforce: f64,
    pub acoustic_db: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,
}

impl InferenceRequest {
    /// Simulated readings carry no acoustic channel, so the caller supplies it.
    pub fn from_sensor_reading(reading: &SensorReading, acoustic_db: f64) -> Self {
        let r = &reading.reading;
        Self {
            pressure_psi: r.pressure,
            flow_rate_lpm: r.flow,
            temperature_c: r.temperature,
            vibration_gforce: r.vibration,
            acoustic_db,
            timestamp: DateTime::from_timestamp_millis(r.timestamp as i64),
            sensor_id: Some(reading.sensor_id.clone()),
        }
    }
}
