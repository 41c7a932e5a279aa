//! Splitting a shift's elapsed time into normal and night minutes.
//!
//! A minute is a night minute when the wall-clock hour at which it starts is
//! 22 or 23, or 0 through 4. Minutes are counted from the shift start, so the
//! count is the same as stepping through the shift one minute at a time and
//! checking each minute's hour. This module computes it in closed form by
//! intersecting the shift with the two night windows of every calendar day
//! it touches.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Hour at which the evening night window opens.
pub const NIGHT_START_HOUR: i64 = 22;

/// Hour at which the early-morning night window closes.
pub const NIGHT_END_HOUR: i64 = 5;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Paid time of one shift, split by night window.
///
/// `normal_minutes + night_minutes == total_minutes` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDuration {
    /// Paid minutes after the unpaid break is deducted.
    pub total_minutes: i64,
    /// Paid minutes outside the night window.
    pub normal_minutes: i64,
    /// Paid minutes inside the night window.
    pub night_minutes: i64,
}

/// Computes the paid duration of a shift.
///
/// - `total = max(0, whole minutes between start and end - break)`
/// - night minutes are counted over the raw elapsed time, then capped at
///   `total`; the break is never taken out of the night bucket specifically
/// - `normal = total - night`
///
/// The function does not roll `end` over to the next day. An `end` before
/// `start` yields an all-zero duration.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_shift_duration;
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2025-01-24 22:00", "%Y-%m-%d %H:%M").unwrap();
/// let end = NaiveDateTime::parse_from_str("2025-01-25 06:00", "%Y-%m-%d %H:%M").unwrap();
///
/// let duration = calculate_shift_duration(start, end, 0);
/// assert_eq!(duration.total_minutes, 480);
/// assert_eq!(duration.night_minutes, 420); // 22:00-24:00 + 00:00-05:00
/// assert_eq!(duration.normal_minutes, 60);
/// ```
pub fn calculate_shift_duration(
    start: NaiveDateTime,
    end: NaiveDateTime,
    break_minutes: u32,
) -> ShiftDuration {
    let elapsed_millis = (end - start).num_milliseconds();

    // Whole minutes, truncated toward zero.
    let elapsed_minutes = elapsed_millis / MILLIS_PER_MINUTE;
    let total_minutes = (elapsed_minutes - i64::from(break_minutes)).max(0);

    let night_minutes = count_night_minutes(start, end).min(total_minutes);

    ShiftDuration {
        total_minutes,
        normal_minutes: total_minutes - night_minutes,
        night_minutes,
    }
}

/// Counts the minutes of `[start, end)` that begin inside a night window.
///
/// Minute `k` begins at `start + k` minutes, for every `k` with
/// `start + k minutes < end`.
fn count_night_minutes(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let elapsed_millis = (end - start).num_milliseconds();
    if elapsed_millis <= 0 {
        return 0;
    }
    let minute_count = ceil_div(elapsed_millis, MILLIS_PER_MINUTE);

    let mut night = 0;
    let mut day = start.date();
    let last_day = end.date();
    while day <= last_day {
        for (window_start, window_end) in night_windows(day) {
            // Minutes k with window_start <= start + k < window_end.
            let first = ceil_div((window_start - start).num_milliseconds(), MILLIS_PER_MINUTE)
                .clamp(0, minute_count);
            let past = ceil_div((window_end - start).num_milliseconds(), MILLIS_PER_MINUTE)
                .clamp(0, minute_count);
            night += past - first;
        }

        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    night
}

/// The two night windows of a calendar day: `[00:00, 05:00)` and
/// `[22:00, 24:00)`.
fn night_windows(day: NaiveDate) -> [(NaiveDateTime, NaiveDateTime); 2] {
    let midnight = day.and_time(NaiveTime::MIN);
    [
        (midnight, midnight + Duration::hours(NIGHT_END_HOUR)),
        (
            midnight + Duration::hours(NIGHT_START_HOUR),
            midnight + Duration::hours(24),
        ),
    ]
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator.div_euclid(denominator);
    if numerator.rem_euclid(denominator) == 0 {
        quotient
    } else {
        quotient + 1
    }
}
