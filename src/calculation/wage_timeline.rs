//! Wage resolution over a revision history.
//!
//! Wage settings arrive unordered and may be dated in the past or the future.
//! Matching is by calendar day; the time of day of `effective_from` only
//! breaks ties between settings that start on the same day.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::WageSetting;

/// Resolves the wage setting in effect on a date.
///
/// Picks the setting with the latest `effective_from` whose day is on or
/// before `target`. Among settings with the same `effective_from`, the one
/// later in the slice wins. If every setting starts after `target`, the
/// oldest setting is returned instead. Returns `None` only for an empty slice.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_wage;
/// use payroll_engine::models::WageSetting;
/// use chrono::NaiveDate;
///
/// let day = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
/// let wages = vec![
///     WageSetting::revision("w2", day(4, 1), 1300, 500).unwrap(),
///     WageSetting::revision("w1", day(1, 1), 1200, 500).unwrap(),
/// ];
///
/// assert_eq!(resolve_wage(&wages, day(3, 31)).unwrap().id, "w1");
/// assert_eq!(resolve_wage(&wages, day(4, 1)).unwrap().id, "w2");
/// // Before all history: the oldest setting still applies.
/// assert_eq!(resolve_wage(&wages, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).unwrap().id, "w1");
/// assert!(resolve_wage(&[], day(4, 1)).is_none());
/// ```
pub fn resolve_wage(wages: &[WageSetting], target: NaiveDate) -> Option<&WageSetting> {
    let in_effect = wages
        .iter()
        .enumerate()
        .filter(|(_, w)| w.effective_day() <= target)
        .max_by_key(|(index, w)| (w.effective_from, *index));

    let (_, setting) = in_effect.or_else(|| {
        wages
            .iter()
            .enumerate()
            .min_by_key(|(index, w)| (w.effective_from, std::cmp::Reverse(*index)))
    })?;
    Some(setting)
}

/// Updates or inserts a wage revision.
///
/// A setting with exactly the same `effective_from` is corrected in place
/// (keeping its ID); otherwise the revision is appended.
///
/// # Errors
///
/// Returns `InvalidWageSetting` if the revision carries a negative amount.
pub fn apply_revision(wages: &mut Vec<WageSetting>, revision: WageSetting) -> EngineResult<()> {
    revision.validate()?;

    match wages
        .iter_mut()
        .find(|w| w.effective_from == revision.effective_from)
    {
        Some(existing) => {
            debug!(
                wage_id = %existing.id,
                effective_from = %existing.effective_from,
                "Correcting existing wage setting"
            );
            existing.hourly_wage = revision.hourly_wage;
            existing.transportation = revision.transportation;
        }
        None => {
            debug!(
                wage_id = %revision.id,
                effective_from = %revision.effective_from,
                "Adding wage revision"
            );
            wages.push(revision);
        }
    }
    Ok(())
}

/// How a wage setting relates to the present moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageStatus {
    /// The setting resolved for today.
    Current,
    /// Takes effect after the present moment.
    Scheduled,
    /// Replaced by a later setting.
    Superseded,
}

/// A wage setting paired with its status, for history listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageHistoryEntry {
    /// The setting.
    pub setting: WageSetting,
    /// Its status at the time the history was built.
    pub status: WageStatus,
}

/// A validated, ordered view of one employee's wage history.
///
/// Building the timeline validates every setting and sorts once, so a batch
/// of lookups (one per shift) does not re-sort.
#[derive(Debug, Clone, Default)]
pub struct WageTimeline {
    /// Sorted by `(effective_from, input position)` ascending.
    entries: Vec<(usize, WageSetting)>,
}

impl WageTimeline {
    /// Validates and orders a set of wage settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWageSetting` for the first setting with a negative
    /// amount.
    pub fn new(wages: &[WageSetting]) -> EngineResult<Self> {
        for wage in wages {
            wage.validate()?;
        }

        let mut entries: Vec<(usize, WageSetting)> = wages.iter().cloned().enumerate().collect();
        entries.sort_by_key(|(index, w)| (w.effective_from, *index));

        Ok(Self { entries })
    }

    /// Returns true if the timeline holds no settings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the setting in effect on `target`, with the same rules as
    /// [`resolve_wage`].
    pub fn resolve(&self, target: NaiveDate) -> Option<&WageSetting> {
        self.resolve_entry(target).map(|(_, w)| w)
    }

    fn resolve_entry(&self, target: NaiveDate) -> Option<&(usize, WageSetting)> {
        self.entries
            .iter()
            .rfind(|(_, w)| w.effective_day() <= target)
            .or_else(|| {
                let (_, oldest) = self.entries.first()?;
                self.entries
                    .iter()
                    .take_while(|(_, w)| w.effective_from == oldest.effective_from)
                    .last()
            })
    }

    /// Returns the hourly wage and transportation for `target`, or zeros
    /// when there is no history.
    pub fn rates_on(&self, target: NaiveDate) -> (i64, i64) {
        self.resolve(target)
            .map_or((0, 0), |w| (w.hourly_wage, w.transportation))
    }

    /// Returns the setting in effect at `as_of`.
    pub fn current(&self, as_of: NaiveDateTime) -> Option<&WageSetting> {
        self.resolve(as_of.date())
    }

    /// Lists every setting, newest first, with its status at `as_of`.
    pub fn history(&self, as_of: NaiveDateTime) -> Vec<WageHistoryEntry> {
        let current_index = self.resolve_entry(as_of.date()).map(|(index, _)| *index);

        self.entries
            .iter()
            .rev()
            .map(|(index, setting)| {
                let status = if Some(*index) == current_index {
                    WageStatus::Current
                } else if setting.effective_from > as_of {
                    WageStatus::Scheduled
                } else {
                    WageStatus::Superseded
                };
                WageHistoryEntry {
                    setting: setting.clone(),
                    status,
                }
            })
            .collect()
    }
}
