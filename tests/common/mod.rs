//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use hybrid_pv_sim::config::ScenarioConfig;
use hybrid_pv_sim::sim::SystemParameters;

/// Reference installation (grid on 17–6, PV cap enforced, 3 days).
pub fn baseline_params() -> SystemParameters {
    ScenarioConfig::baseline().to_parameters()
}

/// Reference installation without a grid connection.
pub fn off_grid_params() -> SystemParameters {
    ScenarioConfig::off_grid().to_parameters()
}

/// Off-grid installation whose discharge limit (1.92 kW) is below the
/// 2.5 kW DC night load.
pub fn starved_discharge_params() -> SystemParameters {
    let mut p = off_grid_params();
    p.c_rate_discharge = 0.05;
    p
}

/// Baseline with the simulated duration replaced.
pub fn params_with_days(days: f64) -> SystemParameters {
    let mut p = baseline_params();
    p.sim_days = days;
    p
}
