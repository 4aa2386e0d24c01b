// Segment health map and sensor status classification

use crate::error::SimulatorError;
use crate::models::{SegmentHealth, Sensor, SensorStatus};

/// Health strictly below this is critical.
pub const CRITICAL_BELOW: f64 = 75.0;
/// Health strictly below this (and not critical) is a warning.
pub const WARNING_BELOW: f64 = 90.0;

pub fn classify(health: f64) -> SensorStatus {
    if health < CRITICAL_BELOW {
        SensorStatus::Critical
    } else if health < WARNING_BELOW {
        SensorStatus::Warning
    } else {
        SensorStatus::Normal
    }
}

fn clamp_health(health: f64) -> f64 {
    if health.is_nan() {
        0.0
    } else {
        health.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Segment {
    id: String,
    from: String,
    to: String,
    health: f64,
}

impl Segment {
    fn touches(&self, sensor_id: &str) -> bool {
        self.from == sensor_id || self.to == sensor_id
    }
}

/// Segments in pipeline order.
#[derive(Debug, Clone, Default)]
pub struct SegmentHealthTracker {
    segments: Vec<Segment>,
}

impl SegmentHealthTracker {
    /// `seeds` are (upstream sensor, downstream sensor, health); ids become "FROM-TO".
    pub fn new<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: Into<String>,
    {
        let segments = seeds
            .into_iter()
            .map(|(from, to, health)| {
                let (from, to) = (from.into(), to.into());
                Segment {
                    id: format!("{}-{}", from, to),
                    from,
                    to,
                    health: clamp_health(health),
                }
            })
            .collect();
        Self { segments }
    }

    pub fn health(&self, segment_id: &str) -> Option<f64> {
        self.segments
            .iter()
            .find(|s| s.id == segment_id)
            .map(|s| s.health)
    }

    /// Returns the stored (clamped) value.
    pub fn set_health(&mut self, segment_id: &str, health: f64) -> Result<f64, SimulatorError> {
        let segment = self
            .segments
            .iter_mut()
            .find(|s| s.id == segment_id)
            .ok_or_else(|| SimulatorError::UnknownSegment(segment_id.to_string()))?;
        segment.health = clamp_health(health);
        Ok(segment.health)
    }

    pub fn values(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.health).collect()
    }

    pub fn snapshot(&self) -> Vec<SegmentHealth> {
        self.segments
            .iter()
            .map(|s| SegmentHealth {
                id: s.id.clone(),
                health: s.health,
            })
            .collect()
    }

    /// Worst touching segment decides; a sensor no segment touches is offline.
    pub fn sensor_status(&self, sensor_id: &str) -> SensorStatus {
        self.segments
            .iter()
            .filter(|s| s.touches(sensor_id))
            .map(|s| s.health)
            .reduce(f64::min)
            .map(classify)
            .unwrap_or(SensorStatus::Offline)
    }

    pub fn refresh_statuses(&self, sensors: &mut [Sensor]) {
        for sensor in sensors.iter_mut() {
            sensor.status = self.sensor_status(&sensor.id);
        }
    }
}
