//! Pay period model.
//!
//! Pay periods close on the 25th: the period labelled `2025-01` runs from
//! 2024-12-26 to 2025-01-25 inclusive. A shift dated after the 25th belongs
//! to the following month's period.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The last day of every pay period.
pub const CLOSING_DAY: u32 = 25;

/// The `YYYY-MM` label of a pay period.
///
/// Keys order chronologically and serialize as their string form.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PeriodKey;
///
/// let key: PeriodKey = "2025-01".parse().unwrap();
/// assert_eq!(key.year(), 2025);
/// assert_eq!(key.month(), 1);
/// assert_eq!(key.to_string(), "2025-01");
/// assert!("2025-13".parse::<PeriodKey>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Creates a key, rejecting months outside 1-12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriodKey {
                key: format!("{:04}-{:02}", year, month),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the key of the period a date is paid in.
    pub fn for_date(date: NaiveDate) -> Self {
        if date.day() > CLOSING_DAY {
            Self::from_month(date.year(), date.month()).next()
        } else {
            Self::from_month(date.year(), date.month())
        }
    }

    fn from_month(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The labelled year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The labelled month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The key of the following period.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::from_month(self.year + 1, 1)
        } else {
            Self::from_month(self.year, self.month + 1)
        }
    }

    /// The key of the preceding period.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self::from_month(self.year - 1, 12)
        } else {
            Self::from_month(self.year, self.month - 1)
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidPeriodKey { key: s.to_string() };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

/// A pay period with its inclusive date range.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::from_key("2025-01").unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2024, 12, 26).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 1, 25).unwrap());
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 12, 26).unwrap())); // start date
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 25).unwrap())); // end date
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 26).unwrap())); // after
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The period label.
    pub key: PeriodKey,
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Builds the period for a key: the 26th of the prior month through the
    /// 25th of the labelled month.
    pub fn for_key(key: PeriodKey) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriodKey {
            key: key.to_string(),
        };
        let prior = key.previous();

        let end_date =
            NaiveDate::from_ymd_opt(key.year, key.month, CLOSING_DAY).ok_or_else(invalid)?;
        let start_date =
            NaiveDate::from_ymd_opt(prior.year, prior.month, CLOSING_DAY + 1).ok_or_else(invalid)?;

        Ok(Self {
            key,
            start_date,
            end_date,
        })
    }

    /// Parses a `YYYY-MM` key and builds its period.
    pub fn from_key(key: &str) -> EngineResult<Self> {
        Self::for_key(key.parse()?)
    }

    /// Returns the period a date is paid in.
    pub fn for_date(date: NaiveDate) -> EngineResult<Self> {
        Self::for_key(PeriodKey::for_date(date))
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_25th_stays_in_current_month() {
        assert_eq!(PeriodKey::for_date(make_date("2025-01-25")).to_string(), "2025-01");
    }

    #[test]
    fn test_26th_moves_to_next_month() {
        assert_eq!(PeriodKey::for_date(make_date("2025-01-26")).to_string(), "2025-02");
    }

    #[test]
    fn test_first_of_month_stays_in_month() {
        assert_eq!(PeriodKey::for_date(make_date("2025-03-01")).to_string(), "2025-03");
    }

    #[test]
    fn test_late_december_rolls_into_next_year() {
        assert_eq!(PeriodKey::for_date(make_date("2024-12-26")).to_string(), "2025-01");
        assert_eq!(PeriodKey::for_date(make_date("2024-12-31")).to_string(), "2025-01");
    }

    #[test]
    fn test_january_period_starts_in_previous_year() {
        let period = PayPeriod::from_key("2025-01").unwrap();
        assert_eq!(period.start_date, make_date("2024-12-26"));
        assert_eq!(period.end_date, make_date("2025-01-25"));
    }

    #[test]
    fn test_march_period_spans_february() {
        let period = PayPeriod::from_key("2024-03").unwrap();
        assert_eq!(period.start_date, make_date("2024-02-26"));
        assert_eq!(period.end_date, make_date("2024-03-25"));
    }

    #[test]
    fn test_for_date_contains_its_date() {
        for date in ["2025-01-01", "2025-01-25", "2025-01-26", "2025-02-28", "2024-12-31"] {
            let date = make_date(date);
            let period = PayPeriod::for_date(date).unwrap();
            assert!(period.contains_date(date), "{} not in {}", date, period.key);
        }
    }

    #[test]
    fn test_period_boundaries_are_inclusive() {
        let period = PayPeriod::from_key("2025-02").unwrap();
        assert!(!period.contains_date(make_date("2025-01-25")));
        assert!(period.contains_date(make_date("2025-01-26")));
        assert!(period.contains_date(make_date("2025-02-25")));
        assert!(!period.contains_date(make_date("2025-02-26")));
    }

    #[test]
    fn test_invalid_keys_are_rejected() {
        for key in ["2025-00", "2025-13", "2025-1", "25-01", "2025/01", "abcd-ef", ""] {
            match PayPeriod::from_key(key) {
                Err(EngineError::InvalidPeriodKey { .. }) => {}
                other => panic!("Expected InvalidPeriodKey for {:?}, got {:?}", key, other),
            }
        }
    }

    #[test]
    fn test_keys_order_chronologically() {
        let mut keys: Vec<PeriodKey> = ["2025-02", "2024-12", "2025-01", "2024-11"]
            .iter()
            .map(|k| k.parse().unwrap())
            .collect();
        keys.sort();
        let labels: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(labels, vec!["2024-11", "2024-12", "2025-01", "2025-02"]);
    }

    #[test]
    fn test_key_serializes_as_string() {
        let key: PeriodKey = "2025-07".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-07\"");

        let parsed: PeriodKey = serde_json::from_str("\"2025-07\"").unwrap();
        assert_eq!(parsed, key);
        assert!(serde_json::from_str::<PeriodKey>("\"2025-7\"").is_err());
    }
}
