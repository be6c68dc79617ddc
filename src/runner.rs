//! Composes average sizing, one simulation run, and the grid-aware PV refinement.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::devices::BatteryBank;
use crate::sim::clock::SLICE_HOURS;
use crate::sim::{SimulationSummary, SimulationTrace, SystemParameters, simulate};
use crate::sizing::{AverageSizingResult, estimate_average_sizing, pv_required_kw};

/// Smallest array the simulator is given when the PV cap is enforced.
pub const MIN_ARRAY_KW: f64 = 0.1;

/// Per-day energy figures for the daily balance chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyEnergyBalance {
    /// AC load energy over the daylight window (kWh).
    pub day_load_kwh: f64,
    /// AC load energy over the night (kWh).
    pub night_load_kwh: f64,
    /// Simulated PV energy per day (kWh).
    pub pv_per_day_kwh: f64,
    /// Simulated grid energy per day (kWh).
    pub grid_per_day_kwh: f64,
}

/// Everything one sizing pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingReport {
    pub parameters: SystemParameters,
    pub bank: BatteryBank,
    pub average: AverageSizingResult,
    /// PV array size used for the simulation (kW).
    pub array_kw: f64,
    pub summary: SimulationSummary,
    #[serde(skip)]
    pub trace: SimulationTrace,
    /// PV array needed once the simulated grid contribution is credited (kW).
    pub pv_required_with_grid_kw: f64,
    /// No-grid PV requirement exceeds the enforced cap.
    pub pv_exceeds_cap: bool,
    pub daily: DailyEnergyBalance,
}

/// PV array size handed to the simulator.
///
/// The no-grid requirement is used as-is unless the cap is enforced, in
/// which case it is clamped into `[MIN_ARRAY_KW, pv_cap_kw]`.
pub fn resolve_array_kw(params: &SystemParameters, pv_required_no_grid_kw: f64) -> f64 {
    if params.enforce_pv_cap {
        params.pv_cap_kw.min(pv_required_no_grid_kw.max(MIN_ARRAY_KW))
    } else {
        pv_required_no_grid_kw
    }
}

/// PV requirement after crediting the average daily grid energy.
///
/// Computed once from a single run; the refined figure is informational and
/// never fed back into another simulation.
pub fn pv_required_with_grid_kw(
    params: &SystemParameters,
    daily_dc_kwh: f64,
    grid_kwh: f64,
    days: f64,
) -> f64 {
    let daily_dc_with_grid = (daily_dc_kwh - grid_kwh / days).max(0.0);
    pv_required_kw(daily_dc_with_grid, params.peak_sun_hours, params.pv_derate)
}

/// Runs the full sizing pass for `params`.
pub fn run_sizing(params: &SystemParameters) -> SizingReport {
    let average = estimate_average_sizing(params);
    let array_kw = resolve_array_kw(params, average.pv_required_no_grid_kw);

    let run = simulate(params, array_kw);
    let summary = run.summary;
    let days = per_day_divisor(params.sim_days, run.trace.len());

    let pv_required_with_grid_kw =
        pv_required_with_grid_kw(params, average.daily_dc_kwh, summary.grid_kwh, days);
    let pv_exceeds_cap = params.enforce_pv_cap && average.pv_required_no_grid_kw > params.pv_cap_kw;

    let daily = DailyEnergyBalance {
        day_load_kwh: average.day_power_kw * average.daylight_hours,
        night_load_kwh: average.night_power_kw * average.night_hours,
        pv_per_day_kwh: summary.pv_kwh / days,
        grid_per_day_kwh: summary.grid_kwh / days,
    };

    info!(
        array_kw,
        pv_required_no_grid_kw = average.pv_required_no_grid_kw,
        pv_required_with_grid_kw,
        nominal_needed_kwh = average.nominal_needed_kwh,
        "sizing complete"
    );
    if pv_exceeds_cap {
        warn!(
            pv_required_kw = average.pv_required_no_grid_kw,
            pv_cap_kw = params.pv_cap_kw,
            "PV requirement exceeds the array cap"
        );
    }
    if summary.has_violations() {
        warn!(
            charge = summary.charge_violations,
            discharge = summary.discharge_violations,
            "battery C-rate limits exceeded"
        );
    }

    SizingReport {
        parameters: params.clone(),
        bank: BatteryBank::from_parameters(params),
        average,
        array_kw,
        summary,
        trace: run.trace,
        pv_required_with_grid_kw,
        pv_exceeds_cap,
        daily,
    }
}

// A non-positive duration still simulates one slice; divide by that instead.
fn per_day_divisor(sim_days: f64, slices: usize) -> f64 {
    if sim_days > 0.0 {
        sim_days
    } else {
        slices as f64 * SLICE_HOURS / 24.0
    }
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cap_note = if self.pv_exceeds_cap { " (> PV cap)" } else { "" };

        writeln!(f, "--- Sizing Report ---")?;
        writeln!(f, "Day load:              {:.2} kW", self.average.day_power_kw)?;
        writeln!(f, "Night load:            {:.2} kW", self.average.night_power_kw)?;
        writeln!(f, "Daily AC energy:       {:.1} kWh", self.average.daily_ac_kwh)?;
        writeln!(
            f,
            "PV required (no grid): {:.1} kW{cap_note}",
            self.average.pv_required_no_grid_kw
        )?;
        writeln!(f, "PV required (grid):    {:.1} kW", self.pv_required_with_grid_kw)?;
        writeln!(
            f,
            "Battery for {} nights:  {:.1} kWh nominal",
            self.parameters.nights_of_autonomy, self.average.nominal_needed_kwh
        )?;
        writeln!(f, "Existing PV cap:       {:.1} kW", self.parameters.pv_cap_kw)?;
        writeln!(f, "Simulated array:       {:.2} kW", self.array_kw)?;
        writeln!(f, "{}", self.bank)?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        writeln!(f, "--- Daily Energy Balance ---")?;
        writeln!(f, "Day load:              {:.2} kWh", self.daily.day_load_kwh)?;
        writeln!(f, "Night load:            {:.2} kWh", self.daily.night_load_kwh)?;
        writeln!(f, "PV generation/day:     {:.2} kWh", self.daily.pv_per_day_kwh)?;
        write!(f, "Grid energy/day:       {:.2} kWh", self.daily.grid_per_day_kwh)
    }
}
