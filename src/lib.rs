//! `titration-curves` library crate.
//!
//! The binary (`titr`) is a thin wrapper around this library so that:
//!
//! - the pH engine is testable without spawning processes
//! - curves and sweeps can be reused from other front-ends
//! - presentation stays separate from the chemistry

pub mod app;
pub mod chem;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod settings;
pub mod sweep;
