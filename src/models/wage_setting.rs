//! Wage setting model.
//!
//! A wage setting is one revision of an employee's hourly wage and daily
//! transportation allowance, effective from a given moment until superseded.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The highest accepted hourly wage, in yen.
pub const MAX_HOURLY_WAGE: i64 = 10_000_000;

/// The highest accepted daily transportation allowance, in yen.
pub const MAX_TRANSPORTATION: i64 = 1_000_000;

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(time) => time,
    None => panic!("23:59:59.999 is a valid time of day"),
};

/// One wage revision.
///
/// Amounts are whole yen. Settings are never deleted; inserting one with a
/// past `effective_from` changes the pay computed for every later date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageSetting {
    /// Unique identifier for the setting.
    pub id: String,
    /// Hourly wage in yen.
    pub hourly_wage: i64,
    /// Flat transportation allowance paid per worked day, in yen.
    pub transportation: i64,
    /// The moment the setting takes effect. Matching uses its calendar day.
    pub effective_from: NaiveDateTime,
}

impl WageSetting {
    /// Creates a validated wage setting.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWageSetting` if either amount is negative or above
    /// [`MAX_HOURLY_WAGE`] / [`MAX_TRANSPORTATION`].
    pub fn new(
        id: impl Into<String>,
        hourly_wage: i64,
        transportation: i64,
        effective_from: NaiveDateTime,
    ) -> EngineResult<Self> {
        let setting = Self {
            id: id.into(),
            hourly_wage,
            transportation,
            effective_from,
        };
        setting.validate()?;
        Ok(setting)
    }

    /// Creates a revision entered for a calendar date.
    ///
    /// The effective moment is pinned to the last millisecond of that day, so
    /// a revision outranks any setting created earlier the same day.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::WageSetting;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    /// let revision = WageSetting::revision("wage_002", date, 1300, 500).unwrap();
    /// assert_eq!(revision.effective_from.to_string(), "2025-04-01 23:59:59.999");
    /// assert_eq!(revision.effective_day(), date);
    /// ```
    pub fn revision(
        id: impl Into<String>,
        effective_date: NaiveDate,
        hourly_wage: i64,
        transportation: i64,
    ) -> EngineResult<Self> {
        Self::new(
            id,
            hourly_wage,
            transportation,
            effective_date.and_time(END_OF_DAY),
        )
    }

    /// Checks that both amounts are within their accepted ranges.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount(&self.id, "hourly wage", self.hourly_wage, MAX_HOURLY_WAGE)?;
        check_amount(&self.id, "transportation", self.transportation, MAX_TRANSPORTATION)
    }

    /// Returns the calendar day the setting takes effect on.
    pub fn effective_day(&self) -> NaiveDate {
        self.effective_from.date()
    }
}

fn check_amount(wage_id: &str, field: &str, value: i64, max: i64) -> EngineResult<()> {
    let message = if value < 0 {
        format!("{} must not be negative (got {})", field, value)
    } else if value > max {
        format!("{} must not exceed {} (got {})", field, max, value)
    } else {
        return Ok(());
    };
    Err(EngineError::InvalidWageSetting {
        wage_id: wage_id.to_string(),
        message,
    })
}
