//! Per-volume pH model.
//!
//! Given the resolved reaction and the initial analyte amount, a titrant volume
//! maps to:
//!
//! - a regime (pre-equivalence, equivalence, post-equivalence)
//! - a pH from the regime's equilibrium formula
//!
//! | reaction | pre | equivalence | post |
//! |---|---|---|---|
//! | SA / SB | `-log10([H+])` excess acid | 7 | `14 + log10([OH-])` excess base |
//! | SB / SA | `14 + log10([OH-])` excess base | 7 | `-log10([H+])` excess acid |
//! | WA / SB | `pKa + log10([A-]/[HA])` | conjugate base hydrolysis | excess base |
//! | WB / SA | `14 - (pKb + log10([BH+]/[B]))` | conjugate acid hydrolysis | excess acid |
//!
//! Unsupported pairs are neutral everywhere.

use crate::chem::{
    EQUIVALENCE_TOL, NEUTRAL_PH, PKW, conjugate_constant, finalize_ph, pk, safe_log10,
    safe_ratio, safe_sqrt,
};
use crate::domain::{Reaction, Regime};

/// Chemistry inputs resolved once per evaluation.
///
/// `k` holds Ka for a weak acid analyte, Kb for a weak base analyte and is unused
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionModel {
    pub reaction: Reaction,
    pub analyte_moles: f64,
    pub analyte_volume_ml: f64,
    pub titrant_concentration: f64,
    pub k: f64,
}

impl ReactionModel {
    /// Titrant amount delivered at `volume_ml` (mol).
    pub fn titrant_moles(&self, volume_ml: f64) -> f64 {
        self.titrant_concentration * volume_ml / 1000.0
    }

    /// Total solution volume at `volume_ml` of titrant (L).
    pub fn total_volume_l(&self, volume_ml: f64) -> f64 {
        (self.analyte_volume_ml + volume_ml) / 1000.0
    }

    pub fn regime(&self, volume_ml: f64) -> Regime {
        if !self.reaction.is_supported() {
            return Regime::Unsupported;
        }
        classify_moles(self.analyte_moles, self.titrant_moles(volume_ml))
    }

    /// Displayable pH at `volume_ml`: finite and within `[0, 14]`.
    pub fn ph(&self, volume_ml: f64) -> f64 {
        finalize_ph(self.raw_ph(volume_ml))
    }

    /// pH straight from the regime formula (may be outside `[0, 14]`).
    pub fn raw_ph(&self, volume_ml: f64) -> f64 {
        self.raw_ph_in(self.regime(volume_ml), volume_ml)
    }

    /// Displayable pH from a given regime's formula, bypassing classification.
    ///
    /// Used to evaluate the equivalence branch at the closed-form equivalence
    /// volume, where rounded moles may not cancel to within tolerance.
    pub fn ph_in(&self, regime: Regime, volume_ml: f64) -> f64 {
        finalize_ph(self.raw_ph_in(regime, volume_ml))
    }

    fn raw_ph_in(&self, regime: Regime, volume_ml: f64) -> f64 {
        let n_a = self.analyte_moles;
        let n_t = self.titrant_moles(volume_ml);
        let v = self.total_volume_l(volume_ml);

        match (self.reaction, regime) {
            (Reaction::Unsupported, _) | (_, Regime::Unsupported) => NEUTRAL_PH,
            (Reaction::StrongAcidStrongBase | Reaction::StrongBaseStrongAcid, Regime::Equivalence) => {
                NEUTRAL_PH
            }

            (Reaction::StrongAcidStrongBase, Regime::PreEquivalence) => ph_from_h((n_a - n_t) / v),
            (Reaction::StrongAcidStrongBase, Regime::PostEquivalence) => ph_from_oh((n_t - n_a) / v),

            (Reaction::StrongBaseStrongAcid, Regime::PreEquivalence) => ph_from_oh((n_a - n_t) / v),
            (Reaction::StrongBaseStrongAcid, Regime::PostEquivalence) => ph_from_h((n_t - n_a) / v),

            (Reaction::WeakAcidStrongBase, Regime::PreEquivalence) => {
                // Buffer: [A-] = titrant added, [HA] = acid left.
                pk(self.k) + safe_log10(safe_ratio(n_t, n_a - n_t))
            }
            (Reaction::WeakAcidStrongBase, Regime::Equivalence) => {
                let kb = conjugate_constant(self.k);
                ph_from_oh(safe_sqrt(kb * n_t / v))
            }
            (Reaction::WeakAcidStrongBase, Regime::PostEquivalence) => ph_from_oh((n_t - n_a) / v),

            (Reaction::WeakBaseStrongAcid, Regime::PreEquivalence) => {
                // Buffer: [BH+] = titrant added, [B] = base left.
                let poh = pk(self.k) + safe_log10(safe_ratio(n_t, n_a - n_t));
                PKW - poh
            }
            (Reaction::WeakBaseStrongAcid, Regime::Equivalence) => {
                let ka = conjugate_constant(self.k);
                ph_from_h(safe_sqrt(ka * n_t / v))
            }
            (Reaction::WeakBaseStrongAcid, Regime::PostEquivalence) => ph_from_h((n_t - n_a) / v),
        }
    }
}

/// Classify a titrant amount against the analyte amount.
pub fn classify_moles(analyte_moles: f64, titrant_moles: f64) -> Regime {
    if (titrant_moles - analyte_moles).abs() < EQUIVALENCE_TOL {
        Regime::Equivalence
    } else if titrant_moles < analyte_moles {
        Regime::PreEquivalence
    } else {
        Regime::PostEquivalence
    }
}

fn ph_from_h(h: f64) -> f64 {
    -safe_log10(h)
}

fn ph_from_oh(oh: f64) -> f64 {
    PKW + safe_log10(oh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(reaction: Reaction, k: f64) -> ReactionModel {
        ReactionModel {
            reaction,
            analyte_moles: 0.005,
            analyte_volume_ml: 50.0,
            titrant_concentration: 0.1,
            k,
        }
    }

    #[test]
    fn classify_uses_tolerance_and_order() {
        assert_eq!(classify_moles(0.005, 0.005), Regime::Equivalence);
        assert_eq!(classify_moles(0.005, 0.004), Regime::PreEquivalence);
        assert_eq!(classify_moles(0.005, 0.006), Regime::PostEquivalence);
        assert_eq!(classify_moles(0.005, 0.0), Regime::PreEquivalence);
    }

    #[test]
    fn strong_acid_start_and_equivalence() {
        let m = model(Reaction::StrongAcidStrongBase, 0.0);
        assert!((m.ph(0.0) - 1.0).abs() < 1e-9);
        assert_eq!(m.ph(50.0), 7.0);
        assert_eq!(m.regime(50.0), Regime::Equivalence);
    }

    #[test]
    fn weak_acid_empty_buffer_clamps_low() {
        let m = model(Reaction::WeakAcidStrongBase, 1e-5);
        assert!(m.raw_ph(0.0) < 0.0);
        assert_eq!(m.ph(0.0), 0.0);
    }

    #[test]
    fn weak_base_empty_buffer_clamps_high() {
        let m = model(Reaction::WeakBaseStrongAcid, 1e-5);
        assert!(m.raw_ph(0.0) > 14.0);
        assert_eq!(m.ph(0.0), 14.0);
    }

    #[test]
    fn weak_acid_equivalence_is_basic() {
        // [A-] = 0.005 / 0.1 L = 0.05 M, Kb = 1e-9 -> [OH-] = sqrt(5e-11).
        let m = model(Reaction::WeakAcidStrongBase, 1e-5);
        let expected = 14.0 + (5e-11_f64).sqrt().log10();
        assert!((m.ph(50.0) - expected).abs() < 1e-9);
        assert!(m.ph(50.0) > 7.0);
    }

    #[test]
    fn weak_base_equivalence_is_acidic() {
        let m = model(Reaction::WeakBaseStrongAcid, 1e-5);
        let expected = -(5e-11_f64).sqrt().log10();
        assert!((m.ph(50.0) - expected).abs() < 1e-9);
        assert!(m.ph(50.0) < 7.0);
    }

    #[test]
    fn forced_regime_skips_classification() {
        let m = model(Reaction::StrongAcidStrongBase, 0.0);
        assert_eq!(m.ph_in(Regime::Equivalence, 49.0), 7.0);
        assert_eq!(m.ph_in(Regime::PreEquivalence, 0.0), m.ph(0.0));
        let m = model(Reaction::Unsupported, 0.0);
        assert_eq!(m.ph_in(Regime::PostEquivalence, 80.0), 7.0);
    }

    #[test]
    fn unsupported_is_neutral() {
        let m = model(Reaction::Unsupported, 0.0);
        for v in [0.0, 25.0, 50.0, 100.0] {
            assert_eq!(m.ph(v), 7.0);
            assert_eq!(m.regime(v), Regime::Unsupported);
        }
    }
}
