//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use hybrid_pv_sim::api::{AppState, router};
use hybrid_pv_sim::runner::run_sizing;

/// Runs the reference sizing pass and returns the API state.
fn build_api_state() -> Arc<AppState> {
    Arc::new(AppState {
        report: run_sizing(&common::baseline_params()),
    })
}

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(build_api_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn report_carries_headline_figures() {
    let (status, json) = get("/report").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["pv_exceeds_cap"], true);
    assert_eq!(json["array_kw"], 5.6);
    let pv_off = json["average"]["pv_required_no_grid_kw"].as_f64().unwrap();
    let pv_with = json["pv_required_with_grid_kw"].as_f64().unwrap();
    assert!(pv_with < pv_off);
    assert_eq!(json["summary"]["discharge_violations"], 0);
    assert!(json["daily"]["grid_per_day_kwh"].as_f64().unwrap() > 0.0);
    assert_eq!(json["parameters"]["battery"]["series"], 4);
}

#[tokio::test]
async fn trace_spans_every_slice() {
    let (status, json) = get("/trace").await;
    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 288);
    for key in [
        "slice",
        "elapsed_hours",
        "hour_of_day",
        "is_day",
        "in_grid",
        "load_ac_kw",
        "pv_kw",
        "grid_kw",
        "battery_kw",
        "soc_kwh",
        "soc_pct",
    ] {
        assert!(rows[0].get(key).is_some(), "missing key {key}");
    }
}

#[tokio::test]
async fn trace_open_ended_range() {
    let (status, json) = get("/trace?from=280").await;
    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[7]["slice"], 287);
}

#[tokio::test]
async fn trace_rejects_inverted_range() {
    let (status, json) = get("/trace?from=9&to=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("must be <="));
}

#[tokio::test]
async fn soc_series_matches_trace_length() {
    let (status, json) = get("/soc").await;
    assert_eq!(status, StatusCode::OK);
    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 288);
    assert_eq!(points[4]["hours"], 1.0);
}
