//! Calculation logic for the payroll engine.
//!
//! Every function here is pure: results depend only on the arguments, and
//! "now" is always passed in as `as_of` rather than read from the clock.
//! The pieces are wage resolution, shift duration with the night window,
//! per-shift pay, pay-period aggregation and yearly threshold tracking.

mod pay;
mod period_aggregation;
mod shift_duration;
mod wage_timeline;
mod yearly_threshold;

pub use pay::{
    NIGHT_PREMIUM_MULTIPLIER, NIGHT_SURCHARGE_RATE, SplitShiftPay, calculate_pay,
    calculate_split_pay,
};
pub use period_aggregation::{aggregate_by_period, aggregate_with_timeline, shifts_in_period};
pub use shift_duration::{
    NIGHT_END_HOUR, NIGHT_START_HOUR, ShiftDuration, calculate_shift_duration,
};
pub use wage_timeline::{WageHistoryEntry, WageStatus, WageTimeline, apply_revision, resolve_wage};
pub use yearly_threshold::{ANNUAL_INCOME_THRESHOLD, calculate_yearly_progress};
