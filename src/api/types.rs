//! API response and query types.

use serde::{Deserialize, Serialize};

/// Optional range query parameters for the trace endpoint.
#[derive(Debug, Deserialize)]
pub struct TraceQuery {
    /// First slice (inclusive).
    pub from: Option<usize>,
    /// Last slice (inclusive).
    pub to: Option<usize>,
}

/// One point of the state-of-charge chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SocPoint {
    /// Elapsed simulation time (h).
    pub hours: f64,
    /// Stored energy as a percentage of usable capacity.
    pub soc_pct: f64,
}

impl From<(f64, f64)> for SocPoint {
    fn from((hours, soc_pct): (f64, f64)) -> Self {
        Self { hours, soc_pct }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
