//! Derived payroll summaries.
//!
//! These types are outputs only; nothing in the engine reads them back.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pay_period::{PayPeriod, PeriodKey};

/// One shift's line in a period summary, as printed on the payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDetail {
    /// The ID of the shift this line came from.
    pub shift_id: String,
    /// The date the shift is attributed to.
    pub date: NaiveDate,
    /// The start time of the shift.
    pub start_time: NaiveDateTime,
    /// The recorded end, `None` for a shift that is still open.
    pub end_time: Option<NaiveDateTime>,
    /// Unpaid break minutes.
    pub break_minutes: u32,
    /// Paid minutes after the break was deducted.
    pub total_minutes: i64,
    /// Paid minutes inside the night window.
    pub night_minutes: i64,
    /// Shift pay in yen (split rounding path).
    pub pay: i64,
}

/// Rollup of one pay period.
///
/// `total_pay` excludes transportation; see [`MonthlySummary::gross_pay`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::{MonthlySummary, PayPeriod};
///
/// let period = PayPeriod::from_key("2025-01").unwrap();
/// let summary = MonthlySummary::new(&period, 1200);
/// assert_eq!(summary.period_key.to_string(), "2025-01");
/// assert_eq!(summary.gross_pay(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The `YYYY-MM` label of the period.
    pub period_key: PeriodKey,
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// Sum of per-shift pay, floored per shift.
    pub total_pay: i64,
    /// Sum of floored base pay (all paid minutes at the hourly wage).
    pub base_pay: i64,
    /// Sum of floored night surcharge (night minutes at 25% of the wage).
    pub night_allowance: i64,
    /// Sum of per-day transportation allowances.
    pub total_transport: i64,
    /// Paid minutes across the period.
    pub total_minutes: i64,
    /// Night minutes across the period.
    pub night_minutes: i64,
    /// Number of shifts in the period.
    pub days_worked: u32,
    /// The wage resolved for the last shift processed in input order.
    pub representative_hourly_wage: i64,
    /// Per-shift lines ordered by date.
    pub shifts: Vec<ShiftDetail>,
}

impl MonthlySummary {
    /// Creates an empty summary for a period.
    pub fn new(period: &PayPeriod, representative_hourly_wage: i64) -> Self {
        Self {
            period_key: period.key,
            period_start: period.start_date,
            period_end: period.end_date,
            total_pay: 0,
            base_pay: 0,
            night_allowance: 0,
            total_transport: 0,
            total_minutes: 0,
            night_minutes: 0,
            days_worked: 0,
            representative_hourly_wage,
            shifts: Vec::new(),
        }
    }

    /// Total payable for the period: pay plus transportation.
    pub fn gross_pay(&self) -> i64 {
        self.total_pay + self.total_transport
    }
}

/// Year-to-date earnings against the annual income threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyProgress {
    /// The calendar year summed.
    pub year: i32,
    /// Pay earned in the year, in yen.
    pub total_pay: i64,
    /// Threshold minus earnings; negative once the threshold is exceeded.
    pub remaining: i64,
    /// Share of the threshold consumed, capped at 100.
    pub percentage_consumed: Decimal,
    /// True while earnings stay strictly below the threshold.
    pub is_within_threshold: bool,
}

impl YearlyProgress {
    /// Returns true once more than 90% of the threshold is consumed.
    pub fn is_near_limit(&self) -> bool {
        self.percentage_consumed > Decimal::from(90)
    }
}
