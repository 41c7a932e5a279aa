//! Parsing of the date and time strings that arrive from shift and wage forms.
//!
//! All values are local wall-clock time. Night-premium detection works on the
//! local hour, so no timezone conversion happens anywhere in the engine.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{EngineError, EngineResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const CLOCK_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Example
///
/// ```
/// use payroll_engine::models::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date("2025-01-24").unwrap(), NaiveDate::from_ymd_opt(2025, 1, 24).unwrap());
/// assert!(parse_date("2025-02-30").is_err());
/// ```
pub fn parse_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| invalid(value, e))
}

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
pub fn parse_clock_time(value: &str) -> EngineResult<NaiveTime> {
    let trimmed = value.trim();
    let mut last_error = None;
    for format in CLOCK_FORMATS {
        match NaiveTime::parse_from_str(trimmed, format) {
            Ok(time) => return Ok(time),
            Err(e) => last_error = Some(e),
        }
    }
    Err(match last_error {
        Some(e) => invalid(value, e),
        None => EngineError::InvalidTimestamp {
            value: value.to_string(),
            message: "unrecognised time".to_string(),
        },
    })
}

/// Parses a local timestamp.
///
/// Accepts ISO-like `YYYY-MM-DDTHH:MM[:SS[.fff]]` (a space may replace the
/// `T`). A bare date is read as midnight of that day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::parse_timestamp;
///
/// let ts = parse_timestamp("2025-01-24T22:00").unwrap();
/// assert_eq!(ts.to_string(), "2025-01-24 22:00:00");
///
/// let midnight = parse_timestamp("2025-01-24").unwrap();
/// assert_eq!(midnight.to_string(), "2025-01-24 00:00:00");
/// ```
pub fn parse_timestamp(value: &str) -> EngineResult<NaiveDateTime> {
    let trimmed = value.trim();
    let mut last_error = None;
    for format in TIMESTAMP_FORMATS {
        match NaiveDateTime::parse_from_str(trimmed, format) {
            Ok(timestamp) => return Ok(timestamp),
            Err(e) => last_error = Some(e),
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(match last_error {
        Some(e) => invalid(value, e),
        None => EngineError::InvalidTimestamp {
            value: value.to_string(),
            message: "unrecognised timestamp".to_string(),
        },
    })
}

fn invalid(value: &str, error: chrono::ParseError) -> EngineError {
    EngineError::InvalidTimestamp {
        value: value.to_string(),
        message: error.to_string(),
    }
}
