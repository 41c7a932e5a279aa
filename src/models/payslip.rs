//! Payslip record.
//!
//! Everything a payslip document prints for one pay period, flattened from a
//! [`MonthlySummary`]. Layout and rendering live outside the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::employee::Employee;
use super::pay_period::PeriodKey;
use super::summary::{MonthlySummary, ShiftDetail};

/// Payslip data for one employee and pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Name printed in the header.
    pub issuer: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The period label.
    pub period: PeriodKey,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Hourly wage shown as applied.
    pub hourly_wage: i64,
    /// Number of shifts worked.
    pub days_worked: u32,
    /// Paid minutes.
    pub total_minutes: i64,
    /// Night minutes.
    pub night_minutes: i64,
    /// Paid time formatted for display.
    pub total_hours_label: String,
    /// Night time formatted for display.
    pub night_hours_label: String,
    /// Base pay.
    pub base_pay: i64,
    /// Night surcharge.
    pub night_allowance: i64,
    /// Transportation allowance.
    pub transportation: i64,
    /// Pay plus transportation.
    pub gross_pay: i64,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Shift lines, ordered by date.
    pub shifts: Vec<ShiftDetail>,
}

impl Payslip {
    /// Builds the payslip for a period summary.
    pub fn from_summary(
        employee: &Employee,
        summary: &MonthlySummary,
        issuer: &str,
        issued_on: NaiveDate,
    ) -> Self {
        Self {
            issuer: issuer.to_string(),
            employee_name: employee.name.clone(),
            period: summary.period_key,
            period_start: summary.period_start,
            period_end: summary.period_end,
            hourly_wage: summary.representative_hourly_wage,
            days_worked: summary.days_worked,
            total_minutes: summary.total_minutes,
            night_minutes: summary.night_minutes,
            total_hours_label: format_minutes(summary.total_minutes),
            night_hours_label: format_minutes(summary.night_minutes),
            base_pay: summary.base_pay,
            night_allowance: summary.night_allowance,
            transportation: summary.total_transport,
            gross_pay: summary.gross_pay(),
            issued_on,
            shifts: summary.shifts.clone(),
        }
    }
}

/// Formats minutes as hours and minutes, omitting a zero minute part.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::format_minutes;
///
/// assert_eq!(format_minutes(450), "7時間 30分");
/// assert_eq!(format_minutes(480), "8時間");
/// assert_eq!(format_minutes(0), "0時間");
/// ```
pub fn format_minutes(minutes: i64) -> String {
    let hours = minutes.div_euclid(60);
    let rest = minutes.rem_euclid(60);
    if rest > 0 {
        format!("{}時間 {}分", hours, rest)
    } else {
        format!("{}時間", hours)
    }
}
