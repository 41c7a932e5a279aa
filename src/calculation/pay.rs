//! Converting a shift duration into yen.
//!
//! There are two rounding paths:
//!
//! - [`calculate_pay`] prices normal minutes at the hourly wage and night
//!   minutes at 125% of it, then floors once. Shift lists and the yearly
//!   threshold use this path.
//! - [`calculate_split_pay`] prices all paid minutes at the hourly wage and
//!   the night minutes again at the 25% surcharge, flooring each component
//!   separately. Period summaries and payslips use this path.
//!
//! Both land on the same shift total. The split components are floored on
//! their own, so base plus allowance can come out one yen under it, and
//! totals summed per shift can drift from a single floor over a period.
//!
//! Wages are clamped into `0..=MAX_HOURLY_WAGE` before pricing. Validated
//! settings are already inside that range.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::MAX_HOURLY_WAGE;

use super::shift_duration::ShiftDuration;

/// Night minutes are paid at 125% of the hourly wage.
pub const NIGHT_PREMIUM_MULTIPLIER: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// The surcharge portion of the night premium.
pub const NIGHT_SURCHARGE_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// A shift's pay broken into base and night surcharge, floored per component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShiftPay {
    /// `floor(total minutes / 60 * wage)`.
    pub base_pay: i64,
    /// `floor(night minutes / 60 * wage * 0.25)`.
    pub night_allowance: i64,
    /// `floor(base + surcharge)` over the unfloored components.
    pub total_pay: i64,
}

/// Calculates single-shift pay with one floor over the combined amount.
///
/// A negative wage is treated as zero and a wage above
/// [`MAX_HOURLY_WAGE`] as that maximum.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{ShiftDuration, calculate_pay};
///
/// let duration = ShiftDuration { total_minutes: 480, normal_minutes: 60, night_minutes: 420 };
/// // floor(60/60 * 1200 + 420/60 * 1200 * 1.25) = floor(1200 + 10500)
/// assert_eq!(calculate_pay(&duration, 1200), 11_700);
/// ```
pub fn calculate_pay(duration: &ShiftDuration, hourly_wage: i64) -> i64 {
    let normal = amount_for(duration.normal_minutes, hourly_wage, Decimal::ONE);
    let night = amount_for(duration.night_minutes, hourly_wage, NIGHT_PREMIUM_MULTIPLIER);
    floor_yen(normal + night)
}

/// Calculates shift pay the way period summaries accumulate it.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{ShiftDuration, calculate_split_pay};
///
/// let duration = ShiftDuration { total_minutes: 480, normal_minutes: 60, night_minutes: 420 };
/// let pay = calculate_split_pay(&duration, 1200);
/// assert_eq!(pay.base_pay, 9_600);
/// assert_eq!(pay.night_allowance, 2_100);
/// assert_eq!(pay.total_pay, 11_700);
/// ```
pub fn calculate_split_pay(duration: &ShiftDuration, hourly_wage: i64) -> SplitShiftPay {
    let base = amount_for(duration.total_minutes, hourly_wage, Decimal::ONE);
    let surcharge = amount_for(duration.night_minutes, hourly_wage, NIGHT_SURCHARGE_RATE);

    SplitShiftPay {
        base_pay: floor_yen(base),
        night_allowance: floor_yen(surcharge),
        total_pay: floor_yen(base + surcharge),
    }
}

/// `minutes / 60 * wage * multiplier`, dividing last so whole-yen results
/// stay exact.
fn amount_for(minutes: i64, hourly_wage: i64, multiplier: Decimal) -> Decimal {
    let hourly_wage = hourly_wage.clamp(0, MAX_HOURLY_WAGE);
    Decimal::from(minutes) * Decimal::from(hourly_wage) * multiplier / MINUTES_PER_HOUR
}

/// Floors to whole yen, saturating at the `i64` bounds.
fn floor_yen(amount: Decimal) -> i64 {
    let floored = amount.floor();
    floored.to_i64().unwrap_or(if floored.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Adds a yen amount to a running total.
///
/// # Errors
///
/// Returns `AmountOverflow` naming `scope` if the sum does not fit in `i64`.
pub(crate) fn add_yen(
    total: i64,
    amount: i64,
    scope: impl FnOnce() -> String,
) -> EngineResult<i64> {
    total
        .checked_add(amount)
        .ok_or_else(|| EngineError::AmountOverflow { scope: scope() })
}
