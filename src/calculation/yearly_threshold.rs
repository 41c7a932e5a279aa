//! Year-to-date earnings against the annual income threshold.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{Shift, WageSetting, YearlyProgress};

use super::pay::{add_yen, calculate_pay};
use super::shift_duration::calculate_shift_duration;
use super::wage_timeline::WageTimeline;

/// Annual earnings cap in yen.
pub const ANNUAL_INCOME_THRESHOLD: i64 = 1_030_000;

/// Sums a calendar year's pay and measures it against
/// [`ANNUAL_INCOME_THRESHOLD`].
///
/// Shifts are selected by the calendar year of their `date`, not by pay
/// period. Each shift is priced with the combined-floor path
/// ([`calculate_pay`]) at the wage in effect on its `date`. Open shifts are
/// measured up to `as_of`.
///
/// # Errors
///
/// - `InvalidWageSetting` if any wage setting is negative or above its maximum
/// - `AmountOverflow` if the year's total no longer fits in `i64`
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_yearly_progress;
/// use payroll_engine::models::{Shift, WageSetting};
/// use chrono::NaiveDate;
///
/// let wages = vec![WageSetting::revision("w1", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 1000, 0).unwrap()];
/// let shifts = vec![Shift::from_clock_times("s1", "2025-03-01", "09:00", "19:00", 0).unwrap()];
/// let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// let progress = calculate_yearly_progress(&shifts, &wages, 2025, as_of).unwrap();
/// assert_eq!(progress.total_pay, 10_000);
/// assert_eq!(progress.remaining, 1_020_000);
/// assert!(progress.is_within_threshold);
/// ```
pub fn calculate_yearly_progress(
    shifts: &[Shift],
    wages: &[WageSetting],
    year: i32,
    as_of: NaiveDateTime,
) -> EngineResult<YearlyProgress> {
    let timeline = WageTimeline::new(wages)?;

    let pays = shifts
        .iter()
        .filter(|shift| shift.year() == year)
        .map(|shift| {
            let (hourly_wage, _) = timeline.rates_on(shift.date);
            let duration = calculate_shift_duration(
                shift.start_time,
                shift.effective_end(as_of),
                shift.break_minutes,
            );
            calculate_pay(&duration, hourly_wage)
        });
    let total_pay = sum_year(year, pays)?;

    let progress = progress_for(year, total_pay);
    debug!(
        year = year,
        total_pay = progress.total_pay,
        remaining = progress.remaining,
        "Calculated yearly threshold progress"
    );
    Ok(progress)
}

fn sum_year(year: i32, pays: impl IntoIterator<Item = i64>) -> EngineResult<i64> {
    pays.into_iter()
        .try_fold(0, |total, pay| add_yen(total, pay, || format!("year {}", year)))
}

fn progress_for(year: i32, total_pay: i64) -> YearlyProgress {
    let threshold = Decimal::from(ANNUAL_INCOME_THRESHOLD);
    let percentage = (Decimal::from(total_pay) * Decimal::ONE_HUNDRED / threshold)
        .min(Decimal::ONE_HUNDRED);
    let remaining = ANNUAL_INCOME_THRESHOLD - total_pay;

    YearlyProgress {
        year,
        total_pay,
        remaining,
        percentage_consumed: percentage,
        is_within_threshold: remaining > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn as_of() -> NaiveDateTime {
        make_date("2025-12-31").and_hms_opt(0, 0, 0).unwrap()
    }

    fn wages() -> Vec<WageSetting> {
        vec![WageSetting::revision("w1", make_date("2024-01-01"), 1200, 500).unwrap()]
    }

    #[test]
    fn test_only_shifts_in_year_are_counted() {
        let shifts = vec![
            Shift::from_clock_times("prev", "2024-12-31", "09:00", "17:00", 0).unwrap(),
            Shift::from_clock_times("this", "2025-01-01", "09:00", "17:00", 0).unwrap(),
            Shift::from_clock_times("next", "2026-01-01", "09:00", "17:00", 0).unwrap(),
        ];

        let progress = calculate_yearly_progress(&shifts, &wages(), 2025, as_of()).unwrap();

        assert_eq!(progress.year, 2025);
        assert_eq!(progress.total_pay, 9_600);
    }

    #[test]
    fn test_calendar_year_not_pay_period_year() {
        // Dec 26 is paid in the next year's January period but still counts
        // toward the calendar year it falls in.
        let shifts =
            vec![Shift::from_clock_times("s1", "2024-12-26", "09:00", "17:00", 0).unwrap()];

        let progress = calculate_yearly_progress(&shifts, &wages(), 2024, as_of()).unwrap();
        assert_eq!(progress.total_pay, 9_600);
    }

    #[test]
    fn test_uses_combined_floor_pay() {
        let shifts = vec![
            Shift::from_clock_times("night", "2025-01-24", "22:00", "06:00", 0).unwrap(),
        ];

        let progress = calculate_yearly_progress(&shifts, &wages(), 2025, as_of()).unwrap();
        assert_eq!(progress.total_pay, 11_700);
    }

    #[test]
    fn test_exact_threshold_is_not_within() {
        let progress = progress_for(2025, ANNUAL_INCOME_THRESHOLD);

        assert_eq!(progress.remaining, 0);
        assert!(!progress.is_within_threshold);
        assert_eq!(progress.percentage_consumed, Decimal::ONE_HUNDRED);
        assert!(progress.is_near_limit());
    }

    #[test]
    fn test_one_yen_below_threshold_is_within() {
        let progress = progress_for(2025, ANNUAL_INCOME_THRESHOLD - 1);

        assert_eq!(progress.remaining, 1);
        assert!(progress.is_within_threshold);
    }

    #[test]
    fn test_percentage_caps_at_one_hundred() {
        let progress = progress_for(2025, 2_060_000);

        assert_eq!(progress.remaining, -1_030_000);
        assert_eq!(progress.percentage_consumed, Decimal::ONE_HUNDRED);
        assert!(!progress.is_within_threshold);
    }

    #[test]
    fn test_percentage_is_unrounded() {
        let progress = progress_for(2025, 515_000);
        assert_eq!(progress.percentage_consumed, Decimal::from(50));
        assert!(!progress.is_near_limit());
    }

    #[test]
    fn test_year_total_overflow_is_an_error() {
        match sum_year(2025, [i64::MAX - 5, 3, 3]) {
            Err(EngineError::AmountOverflow { scope }) => assert_eq!(scope, "year 2025"),
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
        assert_eq!(sum_year(2025, [i64::MAX - 6, 3, 3]).unwrap(), i64::MAX);
    }

    #[test]
    fn test_oversized_wage_fails_fast() {
        let wages = vec![WageSetting {
            id: "huge".to_string(),
            hourly_wage: i64::MAX,
            transportation: 0,
            effective_from: make_date("2025-01-01").and_hms_opt(0, 0, 0).unwrap(),
        }];
        let shifts =
            vec![Shift::from_clock_times("s1", "2025-03-01", "09:00", "11:00", 0).unwrap()];

        assert!(matches!(
            calculate_yearly_progress(&shifts, &wages, 2025, as_of()),
            Err(EngineError::InvalidWageSetting { .. })
        ));
    }

    #[test]
    fn test_no_shifts() {
        let progress = calculate_yearly_progress(&[], &[], 2025, as_of()).unwrap();

        assert_eq!(progress.total_pay, 0);
        assert_eq!(progress.remaining, ANNUAL_INCOME_THRESHOLD);
        assert_eq!(progress.percentage_consumed, Decimal::ZERO);
        assert!(progress.is_within_threshold);
    }
}
