//! Read-only REST API over a completed sizing run.
//!
//! Provides three GET endpoints:
//! - `/report`: headline sizing figures, bank ratings, and run summary
//! - `/trace`: per-slice records with optional range filtering
//! - `/soc`: `(hours, soc_pct)` series for charting

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::runner::SizingReport;

pub use types::{ErrorResponse, SocPoint, TraceQuery};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the sizing run completes and wrapped in
/// `Arc`; no locks are needed since all data is read-only.
pub struct AppState {
    /// Sizing report, including the simulated trace.
    pub report: SizingReport,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/report", get(handlers::get_report))
        .route("/trace", get(handlers::get_trace))
        .route("/soc", get(handlers::get_soc))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
