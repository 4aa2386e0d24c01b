// System health: weighted blend of mean and weakest segment.

pub const MEAN_WEIGHT: f64 = 0.7;
pub const MIN_WEIGHT: f64 = 0.3;

/// `0.7 * mean + 0.3 * min`, or None for no segments.
pub fn system_health(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    Some(MEAN_WEIGHT * mean + MIN_WEIGHT * min)
}
