// Default pipeline: five stations A..E, leak scenario in segment C-D.

use super::rules::RuleTable;
use crate::models::{Coordinates, Sensor, SensorStatus};

#[derive(Debug, Clone)]
pub struct Topology {
    pub sensors: Vec<Sensor>,
    /// (upstream sensor, downstream sensor, seed health)
    pub segments: Vec<(String, String, f64)>,
    pub rules: RuleTable,
}

fn station(
    id: &str,
    name: &str,
    location: &str,
    lat: f64,
    lon: f64,
    position_index: u32,
    corrosion_rate: f64,
) -> Sensor {
    Sensor {
        id: id.to_string(),
        name: name.to_string(),
        coordinates: Coordinates { lat, lon },
        location: location.to_string(),
        position_index,
        corrosion_rate,
        status: SensorStatus::Normal,
    }
}

impl Default for Topology {
    fn default() -> Self {
        let sensors = vec![
            station("A", "Station A", "Intake pump house", 29.7604, -95.3698, 0, 0.08),
            station("B", "Station B", "River crossing", 29.7752, -95.3421, 1, 0.11),
            station("C", "Station C", "Junction valve 3", 29.7897, -95.3105, 2, 0.19),
            station("D", "Station D", "Industrial corridor", 29.8043, -95.2817, 3, 0.24),
            station("E", "Station E", "Terminal storage", 29.8190, -95.2533, 4, 0.13),
        ];
        let segments = [
            ("A", "B", 100.0),
            ("B", "C", 99.8),
            ("C", "D", 88.5),
            ("D", "E", 99.5),
        ]
        .into_iter()
        .map(|(from, to, health)| (from.to_string(), to.to_string(), health))
        .collect();
        Self {
            sensors,
            segments,
            rules: RuleTable::leak_between("C", "D", &["E"]),
        }
    }
}
