//! Request types for the payroll API.
//!
//! Timestamps arrive as strings and are parsed while converting into domain
//! types, so a bad timestamp surfaces as `INVALID_TIMESTAMP` rather than a
//! generic JSON error.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Shift, WageSetting, parse_date, parse_timestamp};

/// Employee information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    #[serde(default)]
    pub email: Option<String>,
}

/// A recorded shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Unique identifier for the shift.
    pub id: String,
    /// The date the shift is attributed to (`YYYY-MM-DD`).
    pub date: String,
    /// Start timestamp.
    pub start_time: String,
    /// End timestamp; omitted while the shift is still open.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Unpaid break minutes.
    #[serde(default)]
    pub break_minutes: i64,
}

/// A wage setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageSettingRequest {
    /// Unique identifier for the setting.
    pub id: String,
    /// Hourly wage in yen.
    pub hourly_wage: i64,
    /// Transportation allowance per shift in yen.
    #[serde(default)]
    pub transportation: i64,
    /// When the setting takes effect.
    pub effective_from: String,
}

/// A wage revision entered for a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageRevisionRequest {
    /// Identifier used if the revision is added as a new setting.
    pub id: String,
    /// The date the revision applies from (`YYYY-MM-DD`).
    pub effective_date: String,
    /// Hourly wage in yen.
    pub hourly_wage: i64,
    /// Transportation allowance per shift in yen.
    #[serde(default)]
    pub transportation: i64,
}

/// Request body for `POST /shifts/quote`.
///
/// Mirrors a shift entry form: a date plus `HH:MM` clock times, where an end
/// at or before the start means the next morning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftQuoteRequest {
    /// Identifier for the quoted shift.
    #[serde(default = "default_quote_id")]
    pub id: String,
    /// The shift date (`YYYY-MM-DD`).
    pub date: String,
    /// Start clock time (`HH:MM`).
    pub start: String,
    /// End clock time (`HH:MM`).
    pub end: String,
    /// Unpaid break minutes.
    #[serde(default)]
    pub break_minutes: i64,
    /// The employee's wage history.
    #[serde(default)]
    pub wages: Vec<WageSettingRequest>,
}

fn default_quote_id() -> String {
    "quote".to_string()
}

/// Request body for `POST /payroll/periods`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodsRequest {
    /// All recorded shifts.
    pub shifts: Vec<ShiftRequest>,
    /// The employee's wage history.
    #[serde(default)]
    pub wages: Vec<WageSettingRequest>,
    /// The moment open shifts are measured up to.
    pub as_of: String,
    /// Restricts the result to one `YYYY-MM` period.
    #[serde(default)]
    pub period: Option<String>,
}

/// Request body for `POST /payroll/yearly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyRequest {
    /// All recorded shifts.
    pub shifts: Vec<ShiftRequest>,
    /// The employee's wage history.
    #[serde(default)]
    pub wages: Vec<WageSettingRequest>,
    /// The moment open shifts are measured up to.
    pub as_of: String,
    /// Calendar year to sum; defaults to the year of `as_of`.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Request body for `POST /payroll/payslip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The employee the payslip is for.
    pub employee: EmployeeRequest,
    /// All recorded shifts.
    pub shifts: Vec<ShiftRequest>,
    /// The employee's wage history.
    #[serde(default)]
    pub wages: Vec<WageSettingRequest>,
    /// The `YYYY-MM` period to issue.
    pub period: String,
    /// The moment open shifts are measured up to.
    pub as_of: String,
    /// Issue date; defaults to the date of `as_of`.
    #[serde(default)]
    pub issued_on: Option<String>,
}

/// Request body for `POST /wages/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageHistoryRequest {
    /// The employee's wage history.
    pub wages: Vec<WageSettingRequest>,
    /// A revision to apply before listing.
    #[serde(default)]
    pub revision: Option<WageRevisionRequest>,
    /// The moment statuses are evaluated at.
    pub as_of: String,
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            name: req.name,
            email: req.email,
        }
    }
}

impl TryFrom<ShiftRequest> for Shift {
    type Error = EngineError;

    fn try_from(req: ShiftRequest) -> EngineResult<Self> {
        let date = parse_date(&req.date)?;
        let start_time = parse_timestamp(&req.start_time)?;
        let end_time = req.end_time.as_deref().map(parse_timestamp).transpose()?;
        let break_minutes =
            u32::try_from(req.break_minutes).map_err(|_| EngineError::InvalidShift {
                shift_id: req.id.clone(),
                message: format!("break minutes must be between 0 and {}", u32::MAX),
            })?;

        Ok(Shift {
            id: req.id,
            date,
            start_time,
            end_time,
            break_minutes,
        })
    }
}

impl TryFrom<WageSettingRequest> for WageSetting {
    type Error = EngineError;

    fn try_from(req: WageSettingRequest) -> EngineResult<Self> {
        let effective_from = parse_timestamp(&req.effective_from)?;
        WageSetting::new(req.id, req.hourly_wage, req.transportation, effective_from)
    }
}

impl TryFrom<WageRevisionRequest> for WageSetting {
    type Error = EngineError;

    fn try_from(req: WageRevisionRequest) -> EngineResult<Self> {
        let effective_date = parse_date(&req.effective_date)?;
        WageSetting::revision(req.id, effective_date, req.hourly_wage, req.transportation)
    }
}

/// Converts every shift, failing on the first invalid one.
pub(crate) fn convert_shifts(shifts: Vec<ShiftRequest>) -> EngineResult<Vec<Shift>> {
    shifts.into_iter().map(Shift::try_from).collect()
}

/// Converts every wage setting, failing on the first invalid one.
pub(crate) fn convert_wages(wages: Vec<WageSettingRequest>) -> EngineResult<Vec<WageSetting>> {
    wages.into_iter().map(WageSetting::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_periods_request() {
        let json = r#"{
            "shifts": [
                {
                    "id": "shift_001",
                    "date": "2025-01-24",
                    "start_time": "2025-01-24T22:00",
                    "end_time": "2025-01-25T06:00"
                }
            ],
            "wages": [
                { "id": "wage_001", "hourly_wage": 1200, "transportation": 500, "effective_from": "2025-01-01" }
            ],
            "as_of": "2025-02-01T00:00"
        }"#;

        let request: PeriodsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.shifts.len(), 1);
        assert_eq!(request.shifts[0].break_minutes, 0);
        assert!(request.period.is_none());
    }

    #[test]
    fn test_shift_conversion() {
        let req = ShiftRequest {
            id: "shift_001".to_string(),
            date: "2025-01-24".to_string(),
            start_time: "2025-01-24T22:00".to_string(),
            end_time: Some("2025-01-25T06:00".to_string()),
            break_minutes: 30,
        };

        let shift = Shift::try_from(req).unwrap();
        assert_eq!(shift.start_time.to_string(), "2025-01-24 22:00:00");
        assert_eq!(shift.end_time.unwrap().to_string(), "2025-01-25 06:00:00");
        assert_eq!(shift.break_minutes, 30);
    }

    #[test]
    fn test_open_shift_conversion() {
        let req = ShiftRequest {
            id: "shift_001".to_string(),
            date: "2025-01-24".to_string(),
            start_time: "2025-01-24T22:00".to_string(),
            end_time: None,
            break_minutes: 0,
        };

        assert!(Shift::try_from(req).unwrap().is_open());
    }

    #[test]
    fn test_shift_conversion_rejects_bad_timestamp() {
        let req = ShiftRequest {
            id: "shift_001".to_string(),
            date: "2025-01-24".to_string(),
            start_time: "yesterday evening".to_string(),
            end_time: None,
            break_minutes: 0,
        };

        assert!(matches!(
            Shift::try_from(req),
            Err(EngineError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_shift_conversion_rejects_negative_break() {
        let req = ShiftRequest {
            id: "shift_001".to_string(),
            date: "2025-01-24".to_string(),
            start_time: "2025-01-24T09:00".to_string(),
            end_time: Some("2025-01-24T17:00".to_string()),
            break_minutes: -15,
        };

        assert!(matches!(
            Shift::try_from(req),
            Err(EngineError::InvalidShift { .. })
        ));
    }

    #[test]
    fn test_wage_conversion_validates_amounts() {
        let req = WageSettingRequest {
            id: "wage_001".to_string(),
            hourly_wage: -1200,
            transportation: 0,
            effective_from: "2025-01-01".to_string(),
        };

        assert!(matches!(
            WageSetting::try_from(req),
            Err(EngineError::InvalidWageSetting { .. })
        ));
    }

    #[test]
    fn test_revision_conversion_pins_end_of_day() {
        let req = WageRevisionRequest {
            id: "wage_002".to_string(),
            effective_date: "2025-04-01".to_string(),
            hourly_wage: 1300,
            transportation: 500,
        };

        let wage = WageSetting::try_from(req).unwrap();
        assert_eq!(wage.effective_from.to_string(), "2025-04-01 23:59:59.999");
    }
}
