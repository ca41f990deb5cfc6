//! Chemistry primitives: equilibrium constants and guarded numeric helpers.

pub mod safe;

pub use safe::*;
