//! Reporting utilities: curve diagnostics and formatted terminal output.

pub mod format;

pub use format::*;

use serde::Serialize;

use crate::domain::{Regime, TitrationCurve};
use crate::engine::{ReactionModel, resolve};
use crate::error::TitrationError;

/// Number of samples per stoichiometric regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegimeCounts {
    pub pre: usize,
    pub equivalence: usize,
    pub post: usize,
    pub unsupported: usize,
}

/// Largest pH jump between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteepestStep {
    /// Midpoint of the two sample volumes (mL).
    pub volume_ml: f64,
    /// Absolute pH change across the step.
    pub delta_ph: f64,
}

/// Regime of every sample, in sample order.
pub fn sample_regimes(curve: &TitrationCurve) -> Result<Vec<Regime>, TitrationError> {
    let model: ReactionModel = resolve(&curve.parameters)?;
    Ok(curve.samples.iter().map(|s| model.regime(s.volume_ml)).collect())
}

pub fn regime_counts(regimes: &[Regime]) -> RegimeCounts {
    let mut counts = RegimeCounts::default();
    for r in regimes {
        match r {
            Regime::PreEquivalence => counts.pre += 1,
            Regime::Equivalence => counts.equivalence += 1,
            Regime::PostEquivalence => counts.post += 1,
            Regime::Unsupported => counts.unsupported += 1,
        }
    }
    counts
}

/// Steepest sampled step of a curve.
///
/// This depends on the sampling grid and can pick the wrong transition on coarse
/// grids; `equivalence_volume_ml` is the authoritative equivalence locator. The
/// step is reported next to it as a sanity check.
pub fn steepest_step(curve: &TitrationCurve) -> Option<SteepestStep> {
    let mut best: Option<SteepestStep> = None;
    for w in curve.samples.windows(2) {
        let delta_ph = (w[1].ph - w[0].ph).abs();
        if best.is_none_or(|b| delta_ph > b.delta_ph) {
            best = Some(SteepestStep {
                volume_ml: 0.5 * (w[0].volume_ml + w[1].volume_ml),
                delta_ph,
            });
        }
    }
    best
}
