//! Pay-period rollups.
//!
//! Shifts are grouped by the period their `date` is paid in (26th through
//! 25th) and priced with the split rounding path.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{MonthlySummary, PayPeriod, PeriodKey, Shift, ShiftDetail, WageSetting};

use super::pay::{SplitShiftPay, add_yen, calculate_split_pay};
use super::shift_duration::calculate_shift_duration;
use super::wage_timeline::WageTimeline;

/// Aggregates shifts into one summary per pay period.
///
/// Wages are resolved by each shift's `date`. Open shifts are measured up to
/// `as_of`. Summaries come back most recent period first, with the shift
/// lines inside each summary ordered by date.
///
/// The summary's `representative_hourly_wage` is the wage of the last shift
/// of that period in input order, so the input is folded as given.
///
/// # Errors
///
/// - `InvalidWageSetting` if any wage setting is negative or above its maximum
/// - `AmountOverflow` if a period's money totals no longer fit in `i64`
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_by_period;
/// use payroll_engine::models::{Shift, WageSetting};
/// use chrono::NaiveDate;
///
/// let wages = vec![WageSetting::revision("w1", NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(), 1200, 500).unwrap()];
/// let shifts = vec![
///     Shift::from_clock_times("s1", "2025-01-25", "09:00", "17:00", 60).unwrap(),
///     Shift::from_clock_times("s2", "2025-01-26", "09:00", "17:00", 60).unwrap(),
/// ];
/// let as_of = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// let summaries = aggregate_by_period(&shifts, &wages, as_of).unwrap();
/// assert_eq!(summaries.len(), 2);
/// assert_eq!(summaries[0].period_key.to_string(), "2025-02");
/// assert_eq!(summaries[1].period_key.to_string(), "2025-01");
/// assert_eq!(summaries[1].total_pay, 8_400);
/// ```
pub fn aggregate_by_period(
    shifts: &[Shift],
    wages: &[WageSetting],
    as_of: NaiveDateTime,
) -> EngineResult<Vec<MonthlySummary>> {
    let timeline = WageTimeline::new(wages)?;
    aggregate_with_timeline(shifts, &timeline, as_of)
}

/// Aggregates shifts against an already validated wage timeline.
///
/// # Errors
///
/// Returns `AmountOverflow` if a period's money totals no longer fit in `i64`.
pub fn aggregate_with_timeline(
    shifts: &[Shift],
    timeline: &WageTimeline,
    as_of: NaiveDateTime,
) -> EngineResult<Vec<MonthlySummary>> {
    let mut periods: BTreeMap<PeriodKey, MonthlySummary> = BTreeMap::new();

    for shift in shifts {
        let period = PayPeriod::for_date(shift.date)?;
        let (hourly_wage, transportation) = timeline.rates_on(shift.date);

        let duration = calculate_shift_duration(
            shift.start_time,
            shift.effective_end(as_of),
            shift.break_minutes,
        );
        let pay = calculate_split_pay(&duration, hourly_wage);

        debug!(
            shift_id = %shift.id,
            period = %period.key,
            hourly_wage = hourly_wage,
            total_minutes = duration.total_minutes,
            night_minutes = duration.night_minutes,
            pay = pay.total_pay,
            "Accumulating shift into pay period"
        );

        let summary = periods
            .entry(period.key)
            .or_insert_with(|| MonthlySummary::new(&period, hourly_wage));

        summary.representative_hourly_wage = hourly_wage;
        add_shift_amounts(summary, &pay, transportation)?;
        summary.total_minutes += duration.total_minutes;
        summary.night_minutes += duration.night_minutes;
        summary.days_worked += 1;
        summary.shifts.push(ShiftDetail {
            shift_id: shift.id.clone(),
            date: shift.date,
            start_time: shift.start_time,
            end_time: shift.end_time,
            break_minutes: shift.break_minutes,
            total_minutes: duration.total_minutes,
            night_minutes: duration.night_minutes,
            pay: pay.total_pay,
        });
    }

    Ok(periods
        .into_values()
        .rev()
        .map(|mut summary| {
            summary.shifts.sort_by_key(|detail| detail.date);
            summary
        })
        .collect())
}

/// Adds one shift's money to a period, leaving it untouched on overflow.
fn add_shift_amounts(
    summary: &mut MonthlySummary,
    pay: &SplitShiftPay,
    transportation: i64,
) -> EngineResult<()> {
    let key = summary.period_key;
    let scope = move || format!("period {}", key);
    let base_pay = add_yen(summary.base_pay, pay.base_pay, scope)?;
    let night_allowance = add_yen(summary.night_allowance, pay.night_allowance, scope)?;
    let total_pay = add_yen(summary.total_pay, pay.total_pay, scope)?;
    let total_transport = add_yen(summary.total_transport, transportation, scope)?;

    summary.base_pay = base_pay;
    summary.night_allowance = night_allowance;
    summary.total_pay = total_pay;
    summary.total_transport = total_transport;
    Ok(())
}

/// Returns the shifts paid in the period labelled `key` (`YYYY-MM`), in
/// input order.
///
/// # Errors
///
/// Returns `InvalidPeriodKey` if `key` is not a valid period label.
pub fn shifts_in_period<'a>(shifts: &'a [Shift], key: &str) -> EngineResult<Vec<&'a Shift>> {
    let period = PayPeriod::from_key(key)?;
    Ok(shifts
        .iter()
        .filter(|shift| period.contains_date(shift.date))
        .collect())
}
