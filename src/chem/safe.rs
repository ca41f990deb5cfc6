//! Guarded logarithms, square roots and pH finalization.
//!
//! The equilibrium formulas hit singularities at the curve edges:
//!
//! - `log10(0)` when no titrant has been added (empty buffer ratio)
//! - `log10(0)` / `sqrt(<0)` when floating-point moles cancel near equivalence
//!
//! Every argument is floored at `LOG_FLOOR` before the operation, and the final
//! value is forced into the displayable pH interval.

/// Water autoionization constant at 25 °C (`Ka · Kb` of a conjugate pair).
pub const KW: f64 = 1e-14;

/// `-log10(KW)`; `pH + pOH` at 25 °C.
pub const PKW: f64 = 14.0;

/// Smallest argument passed to `log10` / `sqrt`.
pub const LOG_FLOOR: f64 = 1e-20;

/// Absolute tolerance (mol) for treating titrant and analyte moles as equal.
pub const EQUIVALENCE_TOL: f64 = 1e-30;

pub const NEUTRAL_PH: f64 = 7.0;
pub const PH_MIN: f64 = 0.0;
pub const PH_MAX: f64 = 14.0;

fn floor_arg(x: f64) -> f64 {
    // `f64::max` ignores NaN, so a NaN argument is floored as well.
    x.max(LOG_FLOOR)
}

/// `log10(max(x, LOG_FLOOR))`.
pub fn safe_log10(x: f64) -> f64 {
    floor_arg(x).log10()
}

/// `sqrt(max(x, LOG_FLOOR))`.
pub fn safe_sqrt(x: f64) -> f64 {
    floor_arg(x).sqrt()
}

/// `numer / max(denom, LOG_FLOOR)`.
pub fn safe_ratio(numer: f64, denom: f64) -> f64 {
    numer / floor_arg(denom)
}

/// `-log10(k)`; used for pKa / pKb.
pub fn pk(k: f64) -> f64 {
    -safe_log10(k)
}

/// Conjugate constant via `Ka · Kb = KW`.
pub fn conjugate_constant(k: f64) -> f64 {
    KW / floor_arg(k)
}

/// Replace non-finite values by neutral pH, then clamp into `[0, 14]`.
pub fn finalize_ph(ph: f64) -> f64 {
    let ph = if ph.is_finite() { ph } else { NEUTRAL_PH };
    ph.clamp(PH_MIN, PH_MAX)
}
