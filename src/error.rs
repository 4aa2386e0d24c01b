// Simulator error taxonomy

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulatorError {
    #[error("unknown sensor: {0}")]
    UnknownSensor(String),
    #[error("unknown segment: {0}")]
    UnknownSegment(String),
    #[error("no telemetry sampled yet")]
    NoSamples,
}
