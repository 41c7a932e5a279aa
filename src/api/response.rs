//! Response types for the payroll API.
//!
//! This module defines the success bodies that are not plain domain types,
//! plus the error response structures and error handling for the HTTP API.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::{ShiftDuration, WageHistoryEntry};
use crate::error::EngineError;
use crate::models::{MonthlySummary, Shift, WageSetting, YearlyProgress};

/// Response body for `POST /shifts/quote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftQuoteResponse {
    /// The shift as built from the form input, end rolled over if needed.
    pub shift: Shift,
    /// Whether the shift ends on the following day.
    pub crosses_midnight: bool,
    /// Paid minutes split by night window.
    pub duration: ShiftDuration,
    /// The wage resolved for the shift date (0 without wage history).
    pub hourly_wage: i64,
    /// The transportation allowance for the shift date.
    pub transportation: i64,
    /// Shift pay, combined-floor rounding.
    pub pay: i64,
}

/// Response body for `POST /payroll/periods`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodsResponse {
    /// Summaries, most recent period first.
    pub periods: Vec<MonthlySummary>,
}

/// Response body for `POST /payroll/yearly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyProgressResponse {
    /// The progress figures.
    #[serde(flatten)]
    pub progress: YearlyProgress,
    /// More than 90% of the threshold is consumed.
    pub is_near_limit: bool,
}

impl From<YearlyProgress> for YearlyProgressResponse {
    fn from(progress: YearlyProgress) -> Self {
        Self {
            is_near_limit: progress.is_near_limit(),
            progress,
        }
    }
}

/// Response body for `POST /wages/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageHistoryResponse {
    /// The setting in effect at `as_of`.
    pub current: Option<WageSetting>,
    /// Every setting, newest first.
    pub history: Vec<WageHistoryEntry>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                let body_text = err.body_text();
                if body_text.contains("missing field") {
                    ApiError::new("VALIDATION_ERROR", body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        Self::bad_request(error)
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidTimestamp { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_TIMESTAMP",
                message,
                "Dates are YYYY-MM-DD, clock times HH:MM, timestamps YYYY-MM-DDTHH:MM[:SS]",
            )),
            EngineError::InvalidWageSetting { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_WAGE_SETTING",
                message,
                "Hourly wage and transportation must be between zero and their maximums",
            )),
            EngineError::InvalidShift { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_SHIFT",
                message,
                "The shift data contains invalid information",
            )),
            EngineError::InvalidPeriodKey { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_PERIOD_KEY",
                message,
                "Pay periods are identified as YYYY-MM",
            )),
            EngineError::AmountOverflow { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("AMOUNT_OUT_OF_RANGE", message),
            },
            EngineError::PeriodNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("PERIOD_NOT_FOUND", message),
            },
        }
    }
}
