//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing a pay slip.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad category of an [`EngineError`].
///
/// Batch callers use the category to decide whether a failure belongs to
/// the caller's input, to the stored employee record, or to the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The call arguments were invalid (period, overtime hours).
    Validation,
    /// The employee record is incomplete or inconsistent.
    DataIntegrity,
    /// The configuration could not be loaded or is inconsistent.
    Configuration,
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::InvalidPeriod {
///     period: "13/2024".to_string(),
///     message: "month must be between 1 and 12".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid pay period '13/2024': month must be between 1 and 12"
/// );
/// assert_eq!(error.kind(), ErrorKind::Validation);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfig {
        /// The offending setting.
        field: String,
        /// A description of what made the setting invalid.
        message: String,
    },

    /// The pay period could not be parsed into a month and year.
    #[error("Invalid pay period '{period}': {message}")]
    InvalidPeriod {
        /// The period text as supplied.
        period: String,
        /// A description of the parse failure.
        message: String,
    },

    /// Overtime hours were negative.
    #[error("Overtime hours cannot be negative: {hours}")]
    NegativeOvertime {
        /// The rejected number of hours.
        hours: Decimal,
    },

    /// Overtime hours exceeded the hours in a month.
    #[error("Overtime hours cannot exceed {max} in a month: {hours}")]
    ExcessiveOvertime {
        /// The rejected number of hours.
        hours: Decimal,
        /// The largest accepted number of hours.
        max: Decimal,
    },

    /// A required numeric field was absent from an employee record.
    #[error("Employee '{employee_id}' is missing required field '{field}'")]
    MissingEmployeeField {
        /// The employee whose record is incomplete.
        employee_id: String,
        /// The missing field.
        field: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

impl EngineError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ErrorKind::Configuration,
            EngineError::InvalidPeriod { .. }
            | EngineError::NegativeOvertime { .. }
            | EngineError::ExcessiveOvertime { .. } => ErrorKind::Validation,
            EngineError::MissingEmployeeField { .. } | EngineError::InvalidEmployee { .. } => {
                ErrorKind::DataIntegrity
            }
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
