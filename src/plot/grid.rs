//! Mass grid generation.
//!
//! Model curves are sampled on a deterministic log-spaced grid spanning the
//! viewport's mass range, so a line looks equally smooth in every decade.

use crate::error::AppError;

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
///
/// The endpoints are exactly `min` and `max` and the grid is strictly
/// increasing. Spans near `f64` resolution yield fewer than `steps` points:
/// samples that round onto a neighbour are dropped.
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(AppError::config(format!(
            "Invalid grid range: min={min}, max={max} (must be finite, >0, and max>min)."
        )));
    }
    if steps < 2 {
        return Err(AppError::config("Grid steps must be >= 2."));
    }

    let log_min = min.log10();
    let log_max = max.log10();
    let step = (log_max - log_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    out.push(min);
    for i in 1..steps - 1 {
        let x = 10f64.powf(log_min + step * i as f64);
        if out.last().is_some_and(|&prev| x > prev) && x < max {
            out.push(x);
        }
    }
    out.push(max);
    Ok(out)
}
