// Domain models (wire + simulator state)

mod health;
mod inference;
mod reading;
mod sensor;

pub use health::{SegmentHealth, SystemHealthReport, TelemetrySnapshot};
pub use inference::InferenceRequest;
pub use reading::{Reading, SensorReading};
pub use sensor::{Coordinates, Sensor, SensorStatus};
