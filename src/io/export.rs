//! Export per-sample results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or plotting scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::domain::{Regime, TitrationCurve};
use crate::error::{AppError, EXIT_INPUT};

/// Write one row per sample: `volume_ml,ph,regime`.
///
/// `regimes` is aligned with `curve.samples`.
pub fn write_samples_csv(path: &Path, curve: &TitrationCurve, regimes: &[Regime]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(EXIT_INPUT, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    let mut out = BufWriter::new(file);

    writeln!(out, "volume_ml,ph,regime")
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV header: {e}")))?;

    for (i, s) in curve.samples.iter().enumerate() {
        let regime = regimes.get(i).map(|r| r.label()).unwrap_or("");
        writeln!(out, "{:.6},{:.6},{}", s.volume_ml, s.ph, regime)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush export CSV: {e}")))?;

    info!(path = %path.display(), rows = curve.samples.len(), "wrote samples CSV");
    Ok(())
}
