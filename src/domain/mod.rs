//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - reactant enums (`AnalyteKind`, `TitrantKind`) and the derived `Reaction`
//! - the immutable engine input (`TitrationParameters`)
//! - engine outputs (`TitrationSample`, `TitrationCurve`, `CurveAnnotations`)
//! - the saved curve schema (`CurveFile`)

pub mod types;

pub use types::*;
