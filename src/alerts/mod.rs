use crate::common::model::{Alert, ForecastPoint};

/// Forecast points strictly above `threshold`, in forecast order. A point
/// sitting exactly on the threshold is not an alert.
pub fn alerts(points: &[ForecastPoint], threshold: f64) -> Vec<Alert> {
    points
        .iter()
        .filter(|point| point.yhat > threshold)
        .map(Alert::from)
        .collect()
}
