//! Titration-curve engine.
//!
//! The engine is a set of small, pure functions:
//! - `ph` maps (reaction, moles, volume) to a pH value and a regime
//! - `curve` validates parameters, samples volumes and builds annotated curves
//!
//! No state is kept between calls, so callers can re-evaluate on every parameter
//! change and from any thread.

pub mod curve;
pub mod ph;

pub use curve::*;
pub use ph::*;
