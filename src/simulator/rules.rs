// Per-sensor adjustment rules: sensor id -> how its reading deviates from the
// distance-corrected global sample. New topologies only need a new table.

use std::collections::HashMap;

use crate::models::Reading;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub pressure_factor: f64,
    pub flow_factor: f64,
    /// Added to vibration (g).
    pub vibration_offset: f64,
}

impl Default for Adjustment {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Adjustment {
    pub const IDENTITY: Adjustment = Adjustment {
        pressure_factor: 1.0,
        flow_factor: 1.0,
        vibration_offset: 0.0,
    };

    pub fn new(pressure_factor: f64, flow_factor: f64, vibration_offset: f64) -> Self {
        Self {
            pressure_factor,
            flow_factor,
            vibration_offset,
        }
    }

    /// Compose: apply `self`, then `next`.
    pub fn then(self, next: Adjustment) -> Adjustment {
        Adjustment {
            pressure_factor: self.pressure_factor * next.pressure_factor,
            flow_factor: self.flow_factor * next.flow_factor,
            vibration_offset: self.vibration_offset + next.vibration_offset,
        }
    }

    pub fn apply(&self, reading: Reading) -> Reading {
        Reading {
            pressure: reading.pressure * self.pressure_factor,
            flow: reading.flow * self.flow_factor,
            vibration: reading.vibration + self.vibration_offset,
            ..reading
        }
    }
}

/// Leak signature just upstream of the leak: flow pulled toward the breach,
/// slight pressure dip, turbulence.
pub const LEAK_UPSTREAM: Adjustment = Adjustment {
    pressure_factor: 0.99,
    flow_factor: 1.15,
    vibration_offset: 0.15,
};

/// Leak signature just downstream of the leak.
pub const LEAK_DOWNSTREAM: Adjustment = Adjustment {
    pressure_factor: 0.85,
    flow_factor: 0.80,
    vibration_offset: 0.0,
};

/// Extra loss per sensor further downstream, compounded onto LEAK_DOWNSTREAM.
pub const LEAK_FURTHER_LOSS: Adjustment = Adjustment {
    pressure_factor: 0.97,
    flow_factor: 0.95,
    vibration_offset: 0.0,
};

#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, Adjustment>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leak between `upstream` and `downstream`; every sensor in `further`
    /// (ordered away from the leak) compounds one more LEAK_FURTHER_LOSS.
    pub fn leak_between(upstream: &str, downstream: &str, further: &[&str]) -> Self {
        let mut table = Self::new();
        table.insert(upstream, LEAK_UPSTREAM);
        table.insert(downstream, LEAK_DOWNSTREAM);
        let mut acc = LEAK_DOWNSTREAM;
        for id in further {
            acc = acc.then(LEAK_FURTHER_LOSS);
            table.insert(id, acc);
        }
        table
    }

    pub fn insert(&mut self, sensor_id: &str, adjustment: Adjustment) {
        self.rules.insert(sensor_id.to_string(), adjustment);
    }

    /// Sensors without a rule read the corrected global sample unchanged.
    pub fn get(&self, sensor_id: &str) -> Adjustment {
        self.rules.get(sensor_id).copied().unwrap_or_default()
    }
}
