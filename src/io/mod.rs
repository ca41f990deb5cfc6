//! Input/output helpers.
//!
//! - curve JSON read/write (`curve`)
//! - per-sample CSV export (`export`)

pub mod curve;
pub mod export;

pub use curve::*;
pub use export::*;
