//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from CLI flags and handed to the engine
//! - exported to JSON/CSV
//! - reloaded later for reporting or comparisons

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The solution being titrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum AnalyteKind {
    StrongAcid,
    WeakAcid,
    StrongBase,
    WeakBase,
}

impl AnalyteKind {
    pub fn display_name(self) -> &'static str {
        match self {
            AnalyteKind::StrongAcid => "strong acid",
            AnalyteKind::WeakAcid => "weak acid",
            AnalyteKind::StrongBase => "strong base",
            AnalyteKind::WeakBase => "weak base",
        }
    }

    pub fn is_weak(self) -> bool {
        matches!(self, AnalyteKind::WeakAcid | AnalyteKind::WeakBase)
    }
}

/// The solution added incrementally. Only strong reagents are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum TitrantKind {
    StrongAcid,
    StrongBase,
}

impl TitrantKind {
    pub fn display_name(self) -> &'static str {
        match self {
            TitrantKind::StrongAcid => "strong acid",
            TitrantKind::StrongBase => "strong base",
        }
    }
}

/// Analyte/titrant pairing, resolved once per evaluation.
///
/// Pairs without a chemistry model collapse into `Unsupported`, which the engine
/// evaluates as neutral pH everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    StrongAcidStrongBase,
    StrongBaseStrongAcid,
    WeakAcidStrongBase,
    WeakBaseStrongAcid,
    Unsupported,
}

impl Reaction {
    pub fn classify(analyte: AnalyteKind, titrant: TitrantKind) -> Self {
        match (analyte, titrant) {
            (AnalyteKind::StrongAcid, TitrantKind::StrongBase) => Reaction::StrongAcidStrongBase,
            (AnalyteKind::StrongBase, TitrantKind::StrongAcid) => Reaction::StrongBaseStrongAcid,
            (AnalyteKind::WeakAcid, TitrantKind::StrongBase) => Reaction::WeakAcidStrongBase,
            (AnalyteKind::WeakBase, TitrantKind::StrongAcid) => Reaction::WeakBaseStrongAcid,
            _ => Reaction::Unsupported,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Reaction::StrongAcidStrongBase => "strong acid vs strong base",
            Reaction::StrongBaseStrongAcid => "strong base vs strong acid",
            Reaction::WeakAcidStrongBase => "weak acid vs strong base",
            Reaction::WeakBaseStrongAcid => "weak base vs strong acid",
            Reaction::Unsupported => "unsupported (neutral fallback)",
        }
    }

    /// Both reactants strong: the equivalence point sits on the neutral pH line.
    pub fn is_strong_pair(self) -> bool {
        matches!(
            self,
            Reaction::StrongAcidStrongBase | Reaction::StrongBaseStrongAcid
        )
    }

    pub fn is_supported(self) -> bool {
        self != Reaction::Unsupported
    }
}

/// Stoichiometric regime of a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Titrant moles below analyte moles (excess analyte / buffer region).
    PreEquivalence,
    /// Titrant moles equal analyte moles within tolerance.
    Equivalence,
    /// Titrant moles above analyte moles (excess titrant).
    PostEquivalence,
    /// No chemistry model for this pairing.
    Unsupported,
}

impl Regime {
    pub fn label(self) -> &'static str {
        match self {
            Regime::PreEquivalence => "pre",
            Regime::Equivalence => "equivalence",
            Regime::PostEquivalence => "post",
            Regime::Unsupported => "unsupported",
        }
    }
}

/// Closed range of titrant volumes to sample (mL).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeRange {
    pub min_ml: f64,
    pub max_ml: f64,
}

impl VolumeRange {
    pub fn new(min_ml: f64, max_ml: f64) -> Self {
        Self { min_ml, max_ml }
    }

    pub fn contains(&self, volume_ml: f64) -> bool {
        volume_ml >= self.min_ml && volume_ml <= self.max_ml
    }
}

/// Engine input. Build one per evaluation; the engine never mutates it.
///
/// Only the dissociation constant matching `analyte_kind` is consulted:
/// `ka` for a weak acid, `kb` for a weak base. The other one is ignored even if set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitrationParameters {
    /// mol/L.
    pub analyte_concentration: f64,
    /// Analyte volume before any titrant is added (mL).
    pub analyte_volume_ml: f64,
    /// mol/L.
    pub titrant_concentration: f64,
    pub analyte_kind: AnalyteKind,
    pub titrant_kind: TitrantKind,
    pub ka: Option<f64>,
    pub kb: Option<f64>,
    pub volume_range: VolumeRange,
    pub sample_count: usize,
}

impl Default for TitrationParameters {
    /// 50 mL of 0.10 M weak acid (Ka = 1e-5) against 0.10 M strong base, 0..100 mL.
    fn default() -> Self {
        Self {
            analyte_concentration: 0.10,
            analyte_volume_ml: 50.0,
            titrant_concentration: 0.10,
            analyte_kind: AnalyteKind::WeakAcid,
            titrant_kind: TitrantKind::StrongBase,
            ka: Some(1e-5),
            kb: Some(1e-5),
            volume_range: VolumeRange::new(0.0, 100.0),
            sample_count: 400,
        }
    }
}

impl TitrationParameters {
    pub fn reaction(&self) -> Reaction {
        Reaction::classify(self.analyte_kind, self.titrant_kind)
    }

    /// Whether `ka` is consulted for this analyte.
    pub fn uses_ka(&self) -> bool {
        self.analyte_kind == AnalyteKind::WeakAcid
    }

    /// Whether `kb` is consulted for this analyte.
    pub fn uses_kb(&self) -> bool {
        self.analyte_kind == AnalyteKind::WeakBase
    }

    /// Initial analyte amount (mol).
    pub fn analyte_moles(&self) -> f64 {
        self.analyte_concentration * self.analyte_volume_ml / 1000.0
    }
}

/// One point of a titration curve. `ph` is always finite and within `[0, 14]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TitrationSample {
    pub volume_ml: f64,
    pub ph: f64,
}

/// Derived overlay quantities for a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveAnnotations {
    pub reaction: Reaction,
    /// Closed-form equivalence volume (mL).
    pub equivalence_volume_ml: f64,
    /// Whether `equivalence_volume_ml` lies within the sampled volume range.
    pub equivalence_in_range: bool,
    /// Buffer midpoint (mL); only set for weak analytes.
    pub half_equivalence_volume_ml: Option<f64>,
    /// pKa (weak acid) or pKb (weak base) of the analyte.
    pub pk: Option<f64>,
    /// Draw the pH 7 reference line (strong/strong pairs only).
    pub neutral_reference: bool,
}

/// Full engine output: inputs, samples and annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct TitrationCurve {
    pub parameters: TitrationParameters,
    pub samples: Vec<TitrationSample>,
    pub annotations: CurveAnnotations,
}

impl TitrationCurve {
    pub fn volumes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.volume_ml).collect()
    }

    pub fn ph_values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.ph).collect()
    }
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub parameters: TitrationParameters,
    pub annotations: CurveAnnotations,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub volume_ml: Vec<f64>,
    pub ph: Vec<f64>,
}
