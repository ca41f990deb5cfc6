//! Parameter sweeps.
//!
//! Responsibilities:
//!
//! - generate a linear or log-spaced grid for one varied parameter
//! - evaluate one curve per grid value (parallel)
//! - summarize each curve at its equivalence and half-equivalence volumes

pub mod grid;
pub mod runner;

pub use grid::*;
pub use runner::*;
