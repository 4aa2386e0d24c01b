// Segment / system health and the per-tick broadcast snapshot

use serde::{Deserialize, Serialize};

use super::{Reading, SensorReading};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentHealth {
    /// Two adjacent sensor ids joined by '-', e.g. "C-D".
    pub id: String,
    /// Percentage in [0, 100].
    pub health: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealthReport {
    /// None when no segments are configured.
    pub system_health: Option<f64>,
    pub segments: Vec<SegmentHealth>,
}

/// Everything the dashboard needs for one tick; sent on /ws/telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    pub timestamp: u64,
    pub global: Reading,
    pub sensors: Vec<SensorReading>,
    pub segments: Vec<SegmentHealth>,
    pub system_health: Option<f64>,
}
