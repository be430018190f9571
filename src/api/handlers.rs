//! HTTP request handlers for the payroll API.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_payroll;
use crate::error::EngineResult;
use crate::models::{Employee, PayPeriod, PaySlip};
use crate::report::{PayrollEntry, PeriodSummary, summarize_period};

use super::request::{CalculatePayrollRequest, PeriodSummaryRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll/summary", post(summary_handler))
        .route("/holidays", get(holidays_handler))
        .with_state(state)
}

/// Handler for `POST /payroll/calculate`.
///
/// Calculates one employee's pay slip for a period.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match perform_calculation(request, &state) {
        Ok(slip) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %slip.employee_id,
                period = %slip.period,
                net_salary = %slip.net_salary,
                "Payroll calculation completed"
            );
            json_response(StatusCode::OK, slip)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /payroll/summary`.
///
/// Pays every submitted employee and aggregates the results. Records that
/// cannot be converted are listed as failures.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing period summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match perform_summary(request, &state, correlation_id) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                period = %summary.period,
                paid = summary.paid_employees(),
                failed = summary.failures.len(),
                total_net_salary = %summary.total_net_salary,
                "Period summary completed"
            );
            json_response(StatusCode::OK, summary)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Period summary failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /holidays`.
async fn holidays_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config().calendar())
}

fn perform_calculation(request: CalculatePayrollRequest, state: &AppState) -> EngineResult<PaySlip> {
    let period = request.pay_period()?;
    let employee = Employee::try_from(request.employee)?;
    calculate_payroll(
        &employee,
        &period,
        request.overtime_hours.unwrap_or_default(),
        state.config().config(),
        state.tip_draw(),
    )
}

fn perform_summary(
    request: PeriodSummaryRequest,
    state: &AppState,
    correlation_id: Uuid,
) -> EngineResult<PeriodSummary> {
    let period: PayPeriod = request.period.parse()?;

    let mut entries = Vec::with_capacity(request.employees.len());
    let mut rejected = Vec::new();
    for entry in request.employees {
        let employee_id = entry.employee.id.clone();
        match PayrollEntry::try_from(entry) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    employee_id = %employee_id,
                    error = %err,
                    "Rejected employee record"
                );
                rejected.push((employee_id, err));
            }
        }
    }

    let mut summary = summarize_period(
        &entries,
        &period,
        state.config().config(),
        state.tip_draw(),
    );
    for (employee_id, err) in rejected {
        summary.record_failure(employee_id, &err);
    }
    Ok(summary)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
