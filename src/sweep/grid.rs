//! Sweep grid generation.

use crate::error::TitrationError;

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, TitrationError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(TitrationError::invalid(
            "sweep",
            format!("Invalid range: min={min}, max={max} (must be finite and max>min)."),
        ));
    }
    check_steps(steps)?;

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out: Vec<f64> = (0..steps).map(|i| min + step * i as f64).collect();
    out[steps - 1] = max;
    Ok(out)
}

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, TitrationError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(TitrationError::invalid(
            "sweep",
            format!("Invalid log range: min={min}, max={max} (must be finite, >0, and max>min)."),
        ));
    }
    check_steps(steps)?;

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push((ln_min + step * i as f64).exp());
    }
    out[0] = min;
    out[steps - 1] = max;
    Ok(out)
}

fn check_steps(steps: usize) -> Result<(), TitrationError> {
    if steps < 2 {
        return Err(TitrationError::invalid("sweep", "Sweep steps must be >= 2."));
    }
    Ok(())
}
