//! HTTP API module for the payroll engine.
//!
//! A thin JSON shell over the calculation functions. Every request carries
//! the shifts, wage history and `as_of` moment it is computed against.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EmployeeRequest, PayslipRequest, PeriodsRequest, ShiftQuoteRequest, ShiftRequest,
    WageHistoryRequest, WageRevisionRequest, WageSettingRequest, YearlyRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, PeriodsResponse, ShiftQuoteResponse, WageHistoryResponse,
    YearlyProgressResponse,
};
pub use state::AppState;
