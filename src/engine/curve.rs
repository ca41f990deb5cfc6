//! Curve evaluation: validation, volume sampling and annotations.
//!
//! `evaluate` is the core contract: parameters in, `(volume, pH)` samples out.
//! Every sample is computed independently from its volume, so the result is a
//! deterministic function of the parameters.

use tracing::{debug, warn};

use crate::chem::pk;
use crate::domain::{
    AnalyteKind, CurveAnnotations, Regime, TitrationCurve, TitrationParameters, TitrationSample,
};
use crate::engine::ph::ReactionModel;
use crate::error::TitrationError;

/// Evaluate the titration curve over `params.volume_range`.
pub fn evaluate(params: &TitrationParameters) -> Result<Vec<TitrationSample>, TitrationError> {
    let model = resolve(params)?;
    if !model.reaction.is_supported() {
        warn!(
            analyte = params.analyte_kind.display_name(),
            titrant = params.titrant_kind.display_name(),
            "unsupported analyte/titrant pair; using neutral pH"
        );
    }
    debug!(
        reaction = model.reaction.display_name(),
        samples = params.sample_count,
        v_min = params.volume_range.min_ml,
        v_max = params.volume_range.max_ml,
        "evaluating titration curve"
    );

    let samples = sample_volumes(
        params.volume_range.min_ml,
        params.volume_range.max_ml,
        params.sample_count,
    )
    .into_iter()
    .map(|volume_ml| TitrationSample {
        volume_ml,
        ph: model.ph(volume_ml),
    })
    .collect();

    Ok(samples)
}

/// Evaluate and attach overlay annotations.
pub fn titrate(params: &TitrationParameters) -> Result<TitrationCurve, TitrationError> {
    let samples = evaluate(params)?;
    Ok(TitrationCurve {
        parameters: params.clone(),
        samples,
        annotations: annotations(params),
    })
}

/// pH at a single titrant volume (which may lie outside `volume_range`).
pub fn ph_at(params: &TitrationParameters, volume_ml: f64) -> Result<f64, TitrationError> {
    let model = resolve(params)?;
    check_volume(volume_ml)?;
    Ok(model.ph(volume_ml))
}

/// Regime at a single titrant volume.
pub fn regime_at(params: &TitrationParameters, volume_ml: f64) -> Result<Regime, TitrationError> {
    let model = resolve(params)?;
    check_volume(volume_ml)?;
    Ok(model.regime(volume_ml))
}

/// Closed-form equivalence volume (mL): `c_a · V_a / c_t`.
///
/// Exact and independent of the sampling grid.
pub fn equivalence_volume_ml(params: &TitrationParameters) -> f64 {
    params.analyte_concentration * params.analyte_volume_ml / params.titrant_concentration
}

/// pH of the equivalence branch at the closed-form equivalence volume.
///
/// Neutral for strong/strong and unsupported pairs; conjugate hydrolysis for weak
/// analytes.
pub fn equivalence_ph(params: &TitrationParameters) -> Result<f64, TitrationError> {
    let model = resolve(params)?;
    let regime = if model.reaction.is_supported() {
        Regime::Equivalence
    } else {
        Regime::Unsupported
    };
    Ok(model.ph_in(regime, equivalence_volume_ml(params)))
}

/// Overlay quantities for a parameter set.
pub fn annotations(params: &TitrationParameters) -> CurveAnnotations {
    let reaction = params.reaction();
    let v_eq = equivalence_volume_ml(params);

    let analyte_pk = match params.analyte_kind {
        AnalyteKind::WeakAcid => params.ka.map(pk),
        AnalyteKind::WeakBase => params.kb.map(pk),
        AnalyteKind::StrongAcid | AnalyteKind::StrongBase => None,
    };
    let half_equivalence_volume_ml = (reaction.is_supported() && params.analyte_kind.is_weak())
        .then_some(v_eq / 2.0);

    CurveAnnotations {
        reaction,
        equivalence_volume_ml: v_eq,
        equivalence_in_range: params.volume_range.contains(v_eq),
        half_equivalence_volume_ml,
        pk: analyte_pk,
        neutral_reference: reaction.is_strong_pair(),
    }
}

/// `n` evenly spaced volumes over `[min, max]`, both endpoints included exactly.
pub fn sample_volumes(min: f64, max: f64, n: usize) -> Vec<f64> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        out.push(min + u * (max - min));
    }
    out[n - 1] = max;
    out
}

/// Validate parameters and resolve the chemistry inputs for one evaluation.
pub fn resolve(params: &TitrationParameters) -> Result<ReactionModel, TitrationError> {
    validate(params)?;

    let k = match params.analyte_kind {
        AnalyteKind::WeakAcid => {
            let ka = params.ka.ok_or(TitrationError::MissingConstant {
                constant: "Ka",
                analyte: "weak acid",
            })?;
            check_positive("ka", ka)?
        }
        AnalyteKind::WeakBase => {
            let kb = params.kb.ok_or(TitrationError::MissingConstant {
                constant: "Kb",
                analyte: "weak base",
            })?;
            check_positive("kb", kb)?
        }
        AnalyteKind::StrongAcid | AnalyteKind::StrongBase => 0.0,
    };

    Ok(ReactionModel {
        reaction: params.reaction(),
        analyte_moles: params.analyte_moles(),
        analyte_volume_ml: params.analyte_volume_ml,
        titrant_concentration: params.titrant_concentration,
        k,
    })
}

/// Reject malformed parameters before any sampling.
pub fn validate(params: &TitrationParameters) -> Result<(), TitrationError> {
    check_positive("analyte_concentration", params.analyte_concentration)?;
    check_positive("analyte_volume_ml", params.analyte_volume_ml)?;
    check_positive("titrant_concentration", params.titrant_concentration)?;

    if params.sample_count < 2 {
        return Err(TitrationError::invalid(
            "sample_count",
            format!("must be >= 2, got {}", params.sample_count),
        ));
    }

    let range = params.volume_range;
    if !(range.min_ml.is_finite() && range.max_ml.is_finite()) {
        return Err(TitrationError::invalid(
            "volume_range",
            format!("bounds must be finite, got [{}, {}]", range.min_ml, range.max_ml),
        ));
    }
    if range.min_ml < 0.0 {
        return Err(TitrationError::invalid(
            "volume_range",
            format!("min must be >= 0, got {}", range.min_ml),
        ));
    }
    if range.max_ml <= range.min_ml {
        return Err(TitrationError::invalid(
            "volume_range",
            format!("max must exceed min, got [{}, {}]", range.min_ml, range.max_ml),
        ));
    }

    Ok(())
}

fn check_positive(name: &'static str, value: f64) -> Result<f64, TitrationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TitrationError::invalid(
            name,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

fn check_volume(volume_ml: f64) -> Result<(), TitrationError> {
    if volume_ml.is_finite() && volume_ml >= 0.0 {
        Ok(())
    } else {
        Err(TitrationError::invalid(
            "volume",
            format!("must be finite and >= 0, got {volume_ml}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TitrantKind, VolumeRange};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn strong_acid_params() -> TitrationParameters {
        TitrationParameters {
            analyte_kind: AnalyteKind::StrongAcid,
            titrant_kind: TitrantKind::StrongBase,
            ka: None,
            kb: None,
            sample_count: 201,
            ..TitrationParameters::default()
        }
    }

    fn weak_acid_params() -> TitrationParameters {
        TitrationParameters {
            sample_count: 201,
            ..TitrationParameters::default()
        }
    }

    fn weak_base_params() -> TitrationParameters {
        TitrationParameters {
            analyte_kind: AnalyteKind::WeakBase,
            titrant_kind: TitrantKind::StrongAcid,
            ka: None,
            kb: Some(1e-5),
            sample_count: 201,
            ..TitrationParameters::default()
        }
    }

    fn mirrored(params: &TitrationParameters) -> TitrationParameters {
        let (analyte_kind, titrant_kind) = match params.analyte_kind {
            AnalyteKind::StrongAcid => (AnalyteKind::StrongBase, TitrantKind::StrongAcid),
            AnalyteKind::StrongBase => (AnalyteKind::StrongAcid, TitrantKind::StrongBase),
            AnalyteKind::WeakAcid => (AnalyteKind::WeakBase, TitrantKind::StrongAcid),
            AnalyteKind::WeakBase => (AnalyteKind::WeakAcid, TitrantKind::StrongBase),
        };
        TitrationParameters {
            analyte_kind,
            titrant_kind,
            ka: params.kb,
            kb: params.ka,
            ..params.clone()
        }
    }

    #[test]
    fn strong_acid_reference_points() {
        let p = strong_acid_params();
        assert!((equivalence_volume_ml(&p) - 50.0).abs() < 1e-9);
        assert!((ph_at(&p, 0.0).unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(ph_at(&p, 50.0).unwrap(), 7.0);

        // Excess OH-: (0.010 - 0.005) mol in 0.150 L.
        let expected = 14.0 + (0.005_f64 / 0.150).log10();
        let ph = ph_at(&p, 100.0).unwrap();
        assert!((ph - expected).abs() < 1e-9);
        assert!((ph - 12.52).abs() < 0.01);
    }

    #[test]
    fn strong_pair_is_neutral_on_sampled_equivalence() {
        let samples = evaluate(&strong_acid_params()).unwrap();
        let eq = samples
            .iter()
            .find(|s| s.volume_ml == 50.0)
            .expect("grid contains 50 mL");
        assert_eq!(eq.ph, 7.0);
    }

    #[test]
    fn weak_acid_half_equivalence_equals_pka() {
        let p = weak_acid_params();
        let half = equivalence_volume_ml(&p) / 2.0;
        let ph = ph_at(&p, half).unwrap();
        assert!((ph - 5.0).abs() < 1e-9, "got {ph}");
    }

    #[test]
    fn weak_base_half_equivalence_equals_14_minus_pkb() {
        let p = TitrationParameters {
            kb: Some(1e-4),
            ..weak_base_params()
        };
        let ph = ph_at(&p, 25.0).unwrap();
        assert!((ph - 10.0).abs() < 1e-9, "got {ph}");
    }

    #[test]
    fn ph_is_monotone_in_titrant_volume() {
        for p in [strong_acid_params(), weak_acid_params()] {
            let samples = evaluate(&p).unwrap();
            for w in samples.windows(2) {
                assert!(w[1].ph >= w[0].ph, "{:?} -> {:?}", w[0], w[1]);
            }
        }
        for p in [mirrored(&strong_acid_params()), weak_base_params()] {
            let samples = evaluate(&p).unwrap();
            for w in samples.windows(2) {
                assert!(w[1].ph <= w[0].ph, "{:?} -> {:?}", w[0], w[1]);
            }
        }
    }

    #[test]
    fn acid_base_swap_mirrors_curve() {
        for p in [strong_acid_params(), weak_acid_params()] {
            let a = evaluate(&p).unwrap();
            let b = evaluate(&mirrored(&p)).unwrap();
            assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(&b) {
                assert_eq!(x.volume_ml, y.volume_ml);
                assert!((y.ph - (14.0 - x.ph)).abs() < 1e-9, "{x:?} vs {y:?}");
            }
        }
    }

    #[test]
    fn evaluation_is_idempotent() {
        let p = weak_acid_params();
        let a = evaluate(&p).unwrap();
        let b = evaluate(&p).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.volume_ml.to_bits(), y.volume_ml.to_bits());
            assert_eq!(x.ph.to_bits(), y.ph.to_bits());
        }
    }

    #[test]
    fn two_samples_are_the_endpoints() {
        let p = TitrationParameters {
            volume_range: VolumeRange::new(0.1, 0.3),
            sample_count: 2,
            ..weak_acid_params()
        };
        let samples = evaluate(&p).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].volume_ml, 0.1);
        assert_eq!(samples[1].volume_ml, 0.3);
    }

    #[test]
    fn invalid_parameters_fail_fast() {
        let base = weak_acid_params();
        let cases = [
            TitrationParameters { volume_range: VolumeRange::new(10.0, 10.0), ..base.clone() },
            TitrationParameters { volume_range: VolumeRange::new(20.0, 10.0), ..base.clone() },
            TitrationParameters { volume_range: VolumeRange::new(-1.0, 10.0), ..base.clone() },
            TitrationParameters { sample_count: 1, ..base.clone() },
            TitrationParameters { sample_count: 0, ..base.clone() },
            TitrationParameters { analyte_concentration: 0.0, ..base.clone() },
            TitrationParameters { analyte_volume_ml: -5.0, ..base.clone() },
            TitrationParameters { titrant_concentration: f64::NAN, ..base.clone() },
            TitrationParameters { ka: Some(0.0), ..base.clone() },
        ];
        for p in cases {
            let err = evaluate(&p).unwrap_err();
            assert!(
                matches!(err, TitrationError::InvalidParameter { .. }),
                "{p:?} -> {err:?}"
            );
        }
    }

    #[test]
    fn missing_constant_is_reported() {
        let p = TitrationParameters { ka: None, ..weak_acid_params() };
        assert_eq!(
            evaluate(&p).unwrap_err(),
            TitrationError::MissingConstant { constant: "Ka", analyte: "weak acid" }
        );

        let p = TitrationParameters { kb: None, ..weak_base_params() };
        assert_eq!(
            evaluate(&p).unwrap_err(),
            TitrationError::MissingConstant { constant: "Kb", analyte: "weak base" }
        );
    }

    #[test]
    fn unused_constant_is_ignored() {
        let with = TitrationParameters { kb: Some(-1.0), ..weak_acid_params() };
        let without = TitrationParameters { kb: None, ..weak_acid_params() };
        assert_eq!(evaluate(&with).unwrap(), evaluate(&without).unwrap());

        let strong = TitrationParameters { ka: Some(f64::NAN), ..strong_acid_params() };
        assert!(evaluate(&strong).is_ok());
    }

    #[test]
    fn unsupported_pair_is_neutral() {
        let p = TitrationParameters {
            titrant_kind: TitrantKind::StrongAcid,
            ..weak_acid_params()
        };
        let samples = evaluate(&p).unwrap();
        assert!(samples.iter().all(|s| s.ph == 7.0));
        assert_eq!(regime_at(&p, 10.0).unwrap(), Regime::Unsupported);
    }

    #[test]
    fn single_volume_is_validated() {
        let p = weak_acid_params();
        assert!(ph_at(&p, -1.0).is_err());
        assert!(ph_at(&p, f64::INFINITY).is_err());
        // Outside the sampled range is fine.
        assert!(ph_at(&p, 250.0).is_ok());
        assert_eq!(regime_at(&p, 80.0).unwrap(), Regime::PostEquivalence);
    }

    #[test]
    fn equivalence_ph_matches_sampled_equivalence() {
        let p = weak_acid_params();
        assert_eq!(equivalence_ph(&p).unwrap(), ph_at(&p, 50.0).unwrap());

        // 0.15 M titrant: moles at 33.33 mL do not cancel exactly, the branch is forced.
        let p = TitrationParameters {
            titrant_concentration: 0.15,
            ..strong_acid_params()
        };
        assert_eq!(equivalence_ph(&p).unwrap(), 7.0);
    }

    #[test]
    fn annotations_follow_reaction() {
        let a = annotations(&strong_acid_params());
        assert!(a.neutral_reference);
        assert!(a.equivalence_in_range);
        assert_eq!(a.half_equivalence_volume_ml, None);
        assert_eq!(a.pk, None);

        let a = annotations(&weak_base_params());
        assert!(!a.neutral_reference);
        assert!((a.half_equivalence_volume_ml.unwrap() - 25.0).abs() < 1e-9);
        assert!((a.pk.unwrap() - 5.0).abs() < 1e-12);

        let p = TitrationParameters {
            titrant_concentration: 0.01,
            ..strong_acid_params()
        };
        let a = annotations(&p);
        assert!((a.equivalence_volume_ml - 500.0).abs() < 1e-9);
        assert!(!a.equivalence_in_range);
    }

    #[test]
    fn titrate_bundles_samples_and_parameters() {
        let p = weak_acid_params();
        let curve = titrate(&p).unwrap();
        assert_eq!(curve.parameters, p);
        assert_eq!(curve.samples.len(), p.sample_count);
        assert_eq!(curve.volumes().len(), curve.ph_values().len());
    }

    #[test]
    fn random_parameters_stay_in_ph_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let analytes = [
            AnalyteKind::StrongAcid,
            AnalyteKind::WeakAcid,
            AnalyteKind::StrongBase,
            AnalyteKind::WeakBase,
        ];
        let titrants = [TitrantKind::StrongAcid, TitrantKind::StrongBase];

        for _ in 0..200 {
            let v_min = rng.gen_range(0.0..20.0);
            let p = TitrationParameters {
                analyte_concentration: rng.gen_range(0.005..1.0),
                analyte_volume_ml: rng.gen_range(5.0..200.0),
                titrant_concentration: rng.gen_range(0.005..1.0),
                analyte_kind: analytes[rng.gen_range(0..analytes.len())],
                titrant_kind: titrants[rng.gen_range(0..titrants.len())],
                ka: Some(10f64.powf(rng.gen_range(-10.0..-2.0))),
                kb: Some(10f64.powf(rng.gen_range(-10.0..-2.0))),
                volume_range: VolumeRange::new(v_min, v_min + rng.gen_range(1.0..200.0)),
                sample_count: rng.gen_range(2..300),
            };
            for s in evaluate(&p).unwrap() {
                assert!(s.ph.is_finite());
                assert!((0.0..=14.0).contains(&s.ph), "{p:?} -> {s:?}");
            }
        }
    }
}
