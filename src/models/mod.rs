//! Core data models for the payroll engine.
//!
//! Shifts and wage settings are inputs owned by the caller; summaries,
//! progress and payslips are derived outputs.

mod employee;
mod pay_period;
mod payslip;
mod shift;
mod summary;
mod time;
mod wage_setting;

pub use employee::Employee;
pub use pay_period::{CLOSING_DAY, PayPeriod, PeriodKey};
pub use payslip::{Payslip, format_minutes};
pub use shift::Shift;
pub use summary::{MonthlySummary, ShiftDetail, YearlyProgress};
pub use time::{parse_clock_time, parse_date, parse_timestamp};
pub use wage_setting::{MAX_HOURLY_WAGE, MAX_TRANSPORTATION, WageSetting};
