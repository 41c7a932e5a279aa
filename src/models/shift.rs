//! Shift model.
//!
//! A shift is attributed to a calendar `date` that is independent of its
//! actual start and end, since shifts may run past midnight.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::time::{parse_clock_time, parse_date};

/// Represents one worked interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The date the shift is attributed to (used for pay periods and wages).
    pub date: NaiveDate,
    /// The start time of the shift.
    pub start_time: NaiveDateTime,
    /// The end time of the shift, `None` while the shift is still open.
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    /// Unpaid break minutes subtracted from the elapsed time.
    #[serde(default)]
    pub break_minutes: u32,
}

impl Shift {
    /// Builds a shift from form input: a date plus `HH:MM` start and end.
    ///
    /// An end time at or before the start time is read as ending on the
    /// following day.
    ///
    /// # Errors
    ///
    /// - `InvalidTimestamp` if the date or either clock time cannot be parsed
    /// - `InvalidShift` if `break_minutes` is negative
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Shift;
    ///
    /// let shift = Shift::from_clock_times("shift_001", "2025-01-24", "22:00", "06:00", 0).unwrap();
    /// assert_eq!(shift.start_time.to_string(), "2025-01-24 22:00:00");
    /// assert_eq!(shift.end_time.unwrap().to_string(), "2025-01-25 06:00:00");
    /// assert!(shift.crosses_midnight());
    /// ```
    pub fn from_clock_times(
        id: impl Into<String>,
        date: &str,
        start: &str,
        end: &str,
        break_minutes: i64,
    ) -> EngineResult<Self> {
        let id = id.into();
        let date = parse_date(date)?;
        let start_time = date.and_time(parse_clock_time(start)?);
        let mut end_time = date.and_time(parse_clock_time(end)?);

        if end_time <= start_time {
            end_time += Duration::days(1);
        }

        let break_minutes = u32::try_from(break_minutes).map_err(|_| EngineError::InvalidShift {
            shift_id: id.clone(),
            message: format!("break minutes must be between 0 and {}", u32::MAX),
        })?;

        Ok(Self {
            id,
            date,
            start_time,
            end_time: Some(end_time),
            break_minutes,
        })
    }

    /// Returns the end used for calculation: the recorded end, or `as_of`
    /// for a shift that is still open.
    pub fn effective_end(&self, as_of: NaiveDateTime) -> NaiveDateTime {
        self.end_time.unwrap_or(as_of)
    }

    /// Returns true if the shift has no recorded end yet.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Returns true if the recorded end falls on a later calendar day than
    /// the start.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time
            .is_some_and(|end| end.date() != self.start_time.date())
    }

    /// Returns the calendar year the shift is attributed to.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}
