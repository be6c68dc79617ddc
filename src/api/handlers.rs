//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, SocPoint, TraceQuery};
use crate::sim::StepRecord;

/// Returns the full sizing report.
///
/// `GET /report` → 200 + `SizingReport` JSON
pub async fn get_report(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.report.clone())
}

/// Returns step records, optionally filtered by slice range.
///
/// `GET /trace` → 200 + `Vec<StepRecord>` JSON
/// `GET /trace?from=N&to=M` → filtered range (inclusive)
/// `GET /trace?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_trace(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TraceQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<StepRecord> = state
        .report
        .trace
        .records()
        .iter()
        .filter(|r| r.slice >= from && r.slice <= to)
        .cloned()
        .collect();

    Ok(Json(records))
}

/// Returns the state-of-charge series.
///
/// `GET /soc` → 200 + `Vec<SocPoint>` JSON
pub async fn get_soc(State(state): State<Arc<AppState>>) -> Json<Vec<SocPoint>> {
    Json(
        state
            .report
            .trace
            .soc_series()
            .into_iter()
            .map(SocPoint::from)
            .collect(),
    )
}
