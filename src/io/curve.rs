//! Read/write curve JSON files.
//!
//! Curve JSON is the portable representation of an evaluated curve:
//! - the exact parameters it was evaluated with
//! - equivalence annotations
//! - the sampled `(volume, pH)` grid
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::domain::{CurveFile, CurveGrid, TitrationCurve, TitrationSample};
use crate::error::{AppError, EXIT_INPUT};

pub const TOOL_NAME: &str = "titr";

/// Build the serializable form of a curve.
pub fn curve_file(curve: &TitrationCurve) -> CurveFile {
    CurveFile {
        tool: TOOL_NAME.to_string(),
        generated_at: Utc::now(),
        parameters: curve.parameters.clone(),
        annotations: curve.annotations.clone(),
        grid: CurveGrid {
            volume_ml: curve.volumes(),
            ph: curve.ph_values(),
        },
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &TitrationCurve) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(EXIT_INPUT, format!("Failed to create curve JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, &curve_file(curve))
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write curve JSON: {e}")))?;

    info!(path = %path.display(), samples = curve.samples.len(), "wrote curve JSON");
    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(EXIT_INPUT, format!("Failed to open curve JSON '{}': {e}", path.display()))
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid curve JSON: {e}")))?;

    if curve.grid.volume_ml.len() != curve.grid.ph.len() {
        return Err(AppError::new(
            EXIT_INPUT,
            format!(
                "Invalid curve JSON: {} volumes but {} pH values.",
                curve.grid.volume_ml.len(),
                curve.grid.ph.len()
            ),
        ));
    }
    Ok(curve)
}

/// Rebuild an in-memory curve from a saved file (no re-evaluation).
pub fn curve_from_file(file: CurveFile) -> TitrationCurve {
    let samples = file
        .grid
        .volume_ml
        .iter()
        .zip(file.grid.ph.iter())
        .map(|(&volume_ml, &ph)| TitrationSample { volume_ml, ph })
        .collect();
    TitrationCurve {
        parameters: file.parameters,
        samples,
        annotations: file.annotations,
    }
}
