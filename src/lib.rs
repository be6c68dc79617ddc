//! Hybrid solar, battery, and grid sizing estimator with a quarter-hour energy simulator.

/// Read-only REST API over a completed run.
#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod devices;
pub mod io;
pub mod runner;
/// Time-stepped energy balance simulation.
pub mod sim;
pub mod sizing;
pub mod telemetry;
