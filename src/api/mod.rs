//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for calculating pay slips,
//! summarising a period and reading the holiday calendar.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AllowancesRequest, CalculatePayrollRequest, DeductionsRequest, EmployeeRequest,
    PayrollEntryRequest, PeriodSummaryRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
