//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    WageTimeline, aggregate_by_period, apply_revision, calculate_pay, calculate_shift_duration,
    calculate_yearly_progress, shifts_in_period,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Payslip, Shift, WageSetting, parse_date, parse_timestamp};

use super::request::{
    PayslipRequest, PeriodsRequest, ShiftQuoteRequest, WageHistoryRequest, YearlyRequest,
    convert_shifts, convert_wages,
};
use super::response::{
    ApiErrorResponse, PeriodsResponse, ShiftQuoteResponse, WageHistoryResponse,
    YearlyProgressResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts/quote", post(quote_handler))
        .route("/payroll/periods", post(periods_handler))
        .route("/payroll/yearly", post(yearly_handler))
        .route("/payroll/payslip", post(payslip_handler))
        .route("/wages/history", post(wage_history_handler))
        .with_state(state)
}

/// Handler for POST /shifts/quote.
///
/// Builds a shift from form input and prices it on its own.
async fn quote_handler(payload: Result<Json<ShiftQuoteRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift quote request");

    match payload {
        Ok(Json(request)) => respond(correlation_id, "Shift quote", || quote_shift(request)),
        Err(rejection) => reject(correlation_id, rejection),
    }
}

/// Handler for POST /payroll/periods.
async fn periods_handler(payload: Result<Json<PeriodsRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing pay period request");

    match payload {
        Ok(Json(request)) => respond(correlation_id, "Pay period aggregation", || {
            summarize_periods(request)
        }),
        Err(rejection) => reject(correlation_id, rejection),
    }
}

/// Handler for POST /payroll/yearly.
async fn yearly_handler(payload: Result<Json<YearlyRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing yearly progress request");

    match payload {
        Ok(Json(request)) => {
            respond(correlation_id, "Yearly progress", || yearly_progress(request))
        }
        Err(rejection) => reject(correlation_id, rejection),
    }
}

/// Handler for POST /payroll/payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    match payload {
        Ok(Json(request)) => respond(correlation_id, "Payslip", || {
            issue_payslip(request, state.config().issuer())
        }),
        Err(rejection) => reject(correlation_id, rejection),
    }
}

/// Handler for POST /wages/history.
async fn wage_history_handler(
    payload: Result<Json<WageHistoryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing wage history request");

    match payload {
        Ok(Json(request)) => respond(correlation_id, "Wage history", || wage_history(request)),
        Err(rejection) => reject(correlation_id, rejection),
    }
}

/// Runs a calculation and renders its result, logging the outcome.
fn respond<T, F>(correlation_id: Uuid, operation: &str, calculate: F) -> Response
where
    T: Serialize,
    F: FnOnce() -> EngineResult<T>,
{
    let start_time = Instant::now();
    match calculate() {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation = operation,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation = operation,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn reject(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection.body_text(),
        "Rejected request body"
    );
    ApiErrorResponse::from(rejection).into_response()
}

fn quote_shift(request: ShiftQuoteRequest) -> EngineResult<ShiftQuoteResponse> {
    let shift = Shift::from_clock_times(
        request.id,
        &request.date,
        &request.start,
        &request.end,
        request.break_minutes,
    )?;
    let wages = convert_wages(request.wages)?;
    let timeline = WageTimeline::new(&wages)?;

    let (hourly_wage, transportation) = timeline.rates_on(shift.date);
    let end_time = shift.end_time.unwrap_or(shift.start_time);
    let duration = calculate_shift_duration(shift.start_time, end_time, shift.break_minutes);

    Ok(ShiftQuoteResponse {
        crosses_midnight: shift.crosses_midnight(),
        pay: calculate_pay(&duration, hourly_wage),
        shift,
        duration,
        hourly_wage,
        transportation,
    })
}

fn summarize_periods(request: PeriodsRequest) -> EngineResult<PeriodsResponse> {
    let as_of = parse_timestamp(&request.as_of)?;
    let wages = convert_wages(request.wages)?;
    let mut shifts = convert_shifts(request.shifts)?;

    if let Some(key) = request.period.as_deref() {
        shifts = shifts_in_period(&shifts, key)?.into_iter().cloned().collect();
    }

    Ok(PeriodsResponse {
        periods: aggregate_by_period(&shifts, &wages, as_of)?,
    })
}

fn yearly_progress(request: YearlyRequest) -> EngineResult<YearlyProgressResponse> {
    let as_of = parse_timestamp(&request.as_of)?;
    let wages = convert_wages(request.wages)?;
    let shifts = convert_shifts(request.shifts)?;
    let year = request.year.unwrap_or_else(|| as_of.year());

    calculate_yearly_progress(&shifts, &wages, year, as_of).map(Into::into)
}

fn issue_payslip(request: PayslipRequest, issuer: &str) -> EngineResult<Payslip> {
    let as_of: NaiveDateTime = parse_timestamp(&request.as_of)?;
    let issued_on = match request.issued_on.as_deref() {
        Some(value) => parse_date(value)?,
        None => as_of.date(),
    };
    let employee = Employee::from(request.employee);
    let wages = convert_wages(request.wages)?;
    let shifts = convert_shifts(request.shifts)?;

    let in_period: Vec<Shift> = shifts_in_period(&shifts, &request.period)?
        .into_iter()
        .cloned()
        .collect();

    let summary = aggregate_by_period(&in_period, &wages, as_of)?
        .into_iter()
        .next()
        .ok_or_else(|| EngineError::PeriodNotFound {
            key: request.period.clone(),
        })?;

    Ok(Payslip::from_summary(&employee, &summary, issuer, issued_on))
}

fn wage_history(request: WageHistoryRequest) -> EngineResult<WageHistoryResponse> {
    let as_of = parse_timestamp(&request.as_of)?;
    let mut wages = convert_wages(request.wages)?;
    if let Some(revision) = request.revision {
        apply_revision(&mut wages, WageSetting::try_from(revision)?)?;
    }

    let timeline = WageTimeline::new(&wages)?;
    Ok(WageHistoryResponse {
        current: timeline.current(as_of).cloned(),
        history: timeline.history(as_of),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::response::ApiError;
    use crate::calculation::WageStatus;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(uri: &str, body: String) -> (StatusCode, Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn wages() -> Value {
        json!([
            { "id": "wage_001", "hourly_wage": 1200, "transportation": 500, "effective_from": "2025-01-01" }
        ])
    }

    #[tokio::test]
    async fn test_quote_overnight_shift() {
        let body = json!({
            "date": "2025-01-24",
            "start": "22:00",
            "end": "06:00",
            "wages": wages(),
        });

        let (status, json) = post_json("/shifts/quote", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["crosses_midnight"], true);
        assert_eq!(json["duration"]["total_minutes"], 480);
        assert_eq!(json["duration"]["night_minutes"], 420);
        assert_eq!(json["duration"]["normal_minutes"], 60);
        assert_eq!(json["hourly_wage"], 1200);
        assert_eq!(json["pay"], 11_700);
    }

    #[tokio::test]
    async fn test_quote_bad_clock_time_returns_400() {
        let body = json!({ "date": "2025-01-24", "start": "25:00", "end": "06:00" });

        let (status, json) = post_json("/shifts/quote", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "INVALID_TIMESTAMP");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, json) = post_json("/payroll/periods", "{invalid json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_as_of_returns_validation_error() {
        let body = json!({ "shifts": [] });

        let (status, json) = post_json("/payroll/periods", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_periods_filter_by_key() {
        let body = json!({
            "shifts": [
                { "id": "s1", "date": "2025-01-25", "start_time": "2025-01-25T09:00", "end_time": "2025-01-25T17:00" },
                { "id": "s2", "date": "2025-01-26", "start_time": "2025-01-26T09:00", "end_time": "2025-01-26T17:00" }
            ],
            "wages": wages(),
            "as_of": "2025-02-28T00:00",
            "period": "2025-02"
        });

        let (status, json) = post_json("/payroll/periods", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let periods = json["periods"].as_array().unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0]["period_key"], "2025-02");
        assert_eq!(periods[0]["shifts"][0]["shift_id"], "s2");
    }

    #[tokio::test]
    async fn test_negative_wage_returns_400() {
        let body = json!({
            "shifts": [],
            "wages": [{ "id": "bad", "hourly_wage": -1, "effective_from": "2025-01-01" }],
            "as_of": "2025-02-28T00:00"
        });

        let (status, json) = post_json("/payroll/yearly", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_WAGE_SETTING");
    }

    #[tokio::test]
    async fn test_yearly_defaults_to_as_of_year() {
        let body = json!({
            "shifts": [
                { "id": "s1", "date": "2024-12-31", "start_time": "2024-12-31T09:00", "end_time": "2024-12-31T17:00" },
                { "id": "s2", "date": "2025-01-02", "start_time": "2025-01-02T09:00", "end_time": "2025-01-02T17:00" }
            ],
            "wages": wages(),
            "as_of": "2025-03-01T00:00"
        });

        let (status, json) = post_json("/payroll/yearly", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["year"], 2025);
        assert_eq!(json["total_pay"], 9_600);
        assert_eq!(json["remaining"], 1_020_400);
        assert_eq!(json["is_within_threshold"], true);
        assert_eq!(json["is_near_limit"], false);
    }

    #[tokio::test]
    async fn test_payslip_for_period() {
        let body = json!({
            "employee": { "id": "emp_001", "name": "Sato Hanako" },
            "shifts": [
                { "id": "s1", "date": "2025-01-24", "start_time": "2025-01-24T22:00", "end_time": "2025-01-25T06:00" }
            ],
            "wages": wages(),
            "period": "2025-01",
            "as_of": "2025-01-31T12:00"
        });

        let (status, json) = post_json("/payroll/payslip", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["issuer"], "Cafe Sakura");
        assert_eq!(json["employee_name"], "Sato Hanako");
        assert_eq!(json["period"], "2025-01");
        assert_eq!(json["base_pay"], 9_600);
        assert_eq!(json["night_allowance"], 2_100);
        assert_eq!(json["gross_pay"], 12_200);
        assert_eq!(json["issued_on"], "2025-01-31");
    }

    #[tokio::test]
    async fn test_payslip_for_empty_period_returns_404() {
        let body = json!({
            "employee": { "id": "emp_001", "name": "Sato Hanako" },
            "shifts": [],
            "period": "2025-03",
            "as_of": "2025-03-31T00:00"
        });

        let (status, json) = post_json("/payroll/payslip", body.to_string()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "PERIOD_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_payslip_bad_period_key_returns_400() {
        let body = json!({
            "employee": { "id": "emp_001", "name": "Sato Hanako" },
            "shifts": [],
            "period": "March",
            "as_of": "2025-03-31T00:00"
        });

        let (status, json) = post_json("/payroll/payslip", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_PERIOD_KEY");
    }

    #[tokio::test]
    async fn test_wage_history_with_revision() {
        let body = json!({
            "wages": wages(),
            "revision": { "id": "wage_002", "effective_date": "2025-04-01", "hourly_wage": 1300, "transportation": 500 },
            "as_of": "2025-04-01T12:00"
        });

        let (status, json) = post_json("/wages/history", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["current"]["id"], "wage_002");
        let history: Vec<crate::calculation::WageHistoryEntry> =
            serde_json::from_value(json["history"].clone()).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].status, WageStatus::Current);
        assert_eq!(history[1].status, WageStatus::Superseded);
    }
}
