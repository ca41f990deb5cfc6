//! Parallel sweep evaluation.
//!
//! Each grid value produces an independent parameter set, so curves are evaluated
//! with `rayon` and collected back in grid order.

use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{TitrationCurve, TitrationParameters};
use crate::engine::{equivalence_ph, ph_at, titrate};
use crate::error::TitrationError;
use crate::sweep::grid::{lin_space, log_space};

/// Which parameter a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SweepAxis {
    Ka,
    Kb,
    AnalyteConc,
    TitrantConc,
    AnalyteVol,
}

impl SweepAxis {
    pub fn label(self) -> &'static str {
        match self {
            SweepAxis::Ka => "Ka",
            SweepAxis::Kb => "Kb",
            SweepAxis::AnalyteConc => "analyte (M)",
            SweepAxis::TitrantConc => "titrant (M)",
            SweepAxis::AnalyteVol => "analyte (mL)",
        }
    }

    /// Copy of `base` with this axis set to `value`.
    pub fn apply(self, base: &TitrationParameters, value: f64) -> TitrationParameters {
        let mut p = base.clone();
        match self {
            SweepAxis::Ka => p.ka = Some(value),
            SweepAxis::Kb => p.kb = Some(value),
            SweepAxis::AnalyteConc => p.analyte_concentration = value,
            SweepAxis::TitrantConc => p.titrant_concentration = value,
            SweepAxis::AnalyteVol => p.analyte_volume_ml = value,
        }
        p
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSpec {
    pub axis: SweepAxis,
    pub min: f64,
    pub max: f64,
    pub steps: usize,
    /// Log-spaced grid (natural for Ka / Kb).
    pub log: bool,
}

impl SweepSpec {
    pub fn values(&self) -> Result<Vec<f64>, TitrationError> {
        if self.log {
            log_space(self.min, self.max, self.steps)
        } else {
            lin_space(self.min, self.max, self.steps)
        }
    }
}

/// One evaluated grid point.
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub value: f64,
    pub equivalence_volume_ml: f64,
    pub ph_half_equivalence: f64,
    pub ph_equivalence: f64,
    pub curve: TitrationCurve,
}

/// Evaluate one curve per grid value.
///
/// Fails with the first invalid grid point (in grid order); no partial output.
pub fn run_sweep(
    base: &TitrationParameters,
    spec: &SweepSpec,
) -> Result<Vec<SweepPoint>, TitrationError> {
    let values = spec.values()?;
    debug!(axis = spec.axis.label(), points = values.len(), "running sweep");

    let results: Vec<Result<SweepPoint, TitrationError>> = values
        .par_iter()
        .map(|&value| {
            let params = spec.axis.apply(base, value);
            let curve = titrate(&params)?;
            let v_eq = curve.annotations.equivalence_volume_ml;
            Ok(SweepPoint {
                value,
                equivalence_volume_ml: v_eq,
                ph_half_equivalence: ph_at(&params, v_eq / 2.0)?,
                ph_equivalence: equivalence_ph(&params)?,
                curve,
            })
        })
        .collect();

    results.into_iter().collect()
}
