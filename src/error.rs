//! Error types for the payroll engine.
//!
//! Calculations clamp rather than fail; the variants here cover the inputs
//! that cannot be clamped into something meaningful (unparseable timestamps,
//! out-of-range money values, totals past `i64`) plus configuration and
//! lookup failures.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimestamp {
///     value: "25:99".to_string(),
///     message: "input is out of range".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid timestamp '25:99': input is out of range");
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

    /// A date or time string could not be parsed.
    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// The raw input.
        value: String,
        /// What the parser rejected.
        message: String,
    },

    /// A wage setting carried a negative or oversized amount.
    #[error("Invalid wage setting '{wage_id}': {message}")]
    InvalidWageSetting {
        /// The ID of the offending wage setting.
        wage_id: String,
        /// A description of what made the setting invalid.
        message: String,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A pay period key was not of the form `YYYY-MM`.
    #[error("Invalid pay period key '{key}'")]
    InvalidPeriodKey {
        /// The rejected key.
        key: String,
    },

    /// A pay total grew past what a yen amount can hold.
    #[error("Pay total for {scope} exceeds the supported range")]
    AmountOverflow {
        /// The period or year being totalled.
        scope: String,
    },

    /// No shifts fall into the requested pay period.
    #[error("No pay period found for '{key}'")]
    PeriodNotFound {
        /// The requested key.
        key: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
