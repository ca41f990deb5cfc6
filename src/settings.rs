//! Environment-provided defaults.
//!
//! `.env` (via `dotenvy`) and the process environment can set sampling defaults
//! that apply whenever the matching CLI flag is omitted:
//!
//! - `TITR_POINTS`: number of samples
//! - `TITR_V_MIN` / `TITR_V_MAX`: titrant volume range (mL)
//!
//! Explicit flags always win.

use crate::error::{AppError, EXIT_INPUT};

pub const ENV_POINTS: &str = "TITR_POINTS";
pub const ENV_V_MIN: &str = "TITR_V_MIN";
pub const ENV_V_MAX: &str = "TITR_V_MAX";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub sample_count: Option<usize>,
    pub v_min: Option<f64>,
    pub v_max: Option<f64>,
}

impl Settings {
    /// Load `.env` (if present) and read settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        Ok(Self {
            sample_count: parse_var(&lookup, ENV_POINTS)?,
            v_min: parse_var(&lookup, ENV_V_MIN)?,
            v_max: parse_var(&lookup, ENV_V_MAX)?,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid {key}='{trimmed}': {e}")))
}
