//! Shared evaluation logic used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! flags + environment defaults -> parameters -> engine -> diagnostics
//!
//! The commands can then focus on presentation (printing vs exports).

use tracing::debug;

use crate::cli::{DEFAULT_K, ReactionArgs};
use crate::domain::{Regime, TitrationCurve, TitrationParameters, VolumeRange};
use crate::engine::titrate;
use crate::error::AppError;
use crate::report::{RegimeCounts, SteepestStep, regime_counts, sample_regimes, steepest_step};
use crate::settings::Settings;

const DEFAULT_V_MIN: f64 = 0.0;
const DEFAULT_V_MAX: f64 = 100.0;
const DEFAULT_POINTS: usize = 400;

/// All computed outputs of a single `titr curve` run.
#[derive(Debug, Clone)]
pub struct CurveRun {
    pub curve: TitrationCurve,
    pub regimes: Vec<Regime>,
    pub counts: RegimeCounts,
    pub steepest: Option<SteepestStep>,
}

/// Build engine parameters from flags, falling back to environment settings.
pub fn parameters_from_args(args: &ReactionArgs, settings: &Settings) -> TitrationParameters {
    let ka = args
        .ka
        .or(args.log_ka.map(|l| 10f64.powf(l)))
        .unwrap_or(DEFAULT_K);
    let kb = args
        .kb
        .or(args.log_kb.map(|l| 10f64.powf(l)))
        .unwrap_or(DEFAULT_K);

    TitrationParameters {
        analyte_concentration: args.analyte_conc,
        analyte_volume_ml: args.analyte_vol,
        titrant_concentration: args.titrant_conc,
        analyte_kind: args.analyte,
        titrant_kind: args.titrant,
        ka: Some(ka),
        kb: Some(kb),
        volume_range: VolumeRange::new(
            args.v_min.or(settings.v_min).unwrap_or(DEFAULT_V_MIN),
            args.v_max.or(settings.v_max).unwrap_or(DEFAULT_V_MAX),
        ),
        sample_count: args.points.or(settings.sample_count).unwrap_or(DEFAULT_POINTS),
    }
}

/// Evaluate a curve and its diagnostics.
pub fn run_curve(params: &TitrationParameters) -> Result<CurveRun, AppError> {
    let curve = titrate(params)?;
    let regimes = sample_regimes(&curve)?;
    let counts = regime_counts(&regimes);
    let steepest = steepest_step(&curve);

    debug!(
        v_eq = curve.annotations.equivalence_volume_ml,
        pre = counts.pre,
        post = counts.post,
        "curve evaluated"
    );

    Ok(CurveRun {
        curve,
        regimes,
        counts,
        steepest,
    })
}
