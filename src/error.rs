//! Error types.
//!
//! - `TitrationError`: typed failures of the engine (bad parameters, missing constants)
//! - `AppError`: what the `titr` binary reports, carrying a process exit code

use thiserror::Error;

/// Exit code for invalid user input and file I/O problems.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for internal failures.
pub const EXIT_INTERNAL: u8 = 4;

/// Failures surfaced by the titration engine before any sampling happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TitrationError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Missing {constant} for {analyte} analyte.")]
    MissingConstant {
        constant: &'static str,
        analyte: &'static str,
    },
}

impl TitrationError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<TitrationError> for AppError {
    fn from(err: TitrationError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
