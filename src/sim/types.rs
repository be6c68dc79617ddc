//! Core simulation types: system parameters, per-slice records, and run output.

use std::fmt;

use serde::Serialize;

use super::summary::SimulationSummary;

/// Series/parallel layout of the battery bank and the rating of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryTopology {
    /// Cells (or blocks) in series.
    pub series: u32,
    /// Parallel strings.
    pub parallel: u32,
    /// Nominal voltage of one cell (V).
    pub cell_voltage: f64,
    /// Capacity of one cell (Ah).
    pub cell_capacity_ah: f64,
}

/// Grid availability window and import limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridParameters {
    /// Whether a grid connection exists at all.
    pub enabled: bool,
    /// Window start, hour of day (inclusive).
    pub start_hour: f64,
    /// Window end, hour of day (exclusive). Wraps past midnight when `<= start_hour`.
    pub end_hour: f64,
    /// Maximum AC import power (kW).
    pub max_ac_kw: f64,
}

/// Immutable parameter snapshot for one sizing run.
///
/// Built by the application layer (see [`crate::config::ScenarioConfig::to_parameters`])
/// and passed by reference into every pure computation. Nothing in the
/// crate mutates it.
///
/// Preconditions (not checked here): `peak_sun_hours * pv_derate > 0`,
/// efficiencies in `(0, 1]`, and non-negative topology values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemParameters {
    /// AC bus voltage (V).
    pub ac_voltage: f64,
    /// AC load current during daylight (A).
    pub day_current_a: f64,
    /// AC load current at night (A).
    pub night_current_a: f64,
    /// Daylight start, hour of day.
    pub sun_start_hour: f64,
    /// Daylight end, hour of day (exclusive).
    pub sun_end_hour: f64,
    /// Peak-sun-hours equivalent per day.
    pub peak_sun_hours: f64,
    /// PV derating factor (0..1).
    pub pv_derate: f64,
    /// Inverter efficiency (0..1).
    pub inverter_efficiency: f64,
    /// Battery round-trip efficiency (0..1).
    pub round_trip_efficiency: f64,
    /// Depth-of-discharge fraction (0..1).
    pub depth_of_discharge: f64,
    /// Nights the bank must carry the load without PV.
    pub nights_of_autonomy: u32,
    /// Simulated duration in days (may be fractional).
    pub sim_days: f64,
    /// Battery bank layout.
    pub battery: BatteryTopology,
    /// Charge C-rate limit.
    pub c_rate_charge: f64,
    /// Discharge C-rate limit.
    pub c_rate_discharge: f64,
    /// Existing PV array cap (kW).
    pub pv_cap_kw: f64,
    /// Whether the resolved array is clamped to `pv_cap_kw`.
    pub enforce_pv_cap: bool,
    /// Grid assist settings.
    pub grid: GridParameters,
}

/// Complete record of one simulation slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// Slice index.
    pub slice: usize,
    /// Hours since simulation start.
    pub elapsed_hours: f64,
    /// Hour of day in `[0, 24)`.
    pub hour_of_day: f64,
    /// Whether the slice falls inside the daylight window.
    pub is_day: bool,
    /// Whether grid assist is available in this slice.
    pub in_grid: bool,
    /// AC load power (kW).
    pub load_ac_kw: f64,
    /// PV DC output (kW).
    pub pv_kw: f64,
    /// Grid DC-equivalent power booked this slice (load share plus headroom, kW).
    pub grid_kw: f64,
    /// Battery DC power (kW; positive=charge, negative=discharge).
    pub battery_kw: f64,
    /// Stored energy at the end of the slice (kWh).
    pub soc_kwh: f64,
    /// Stored energy as a percentage of usable capacity.
    pub soc_pct: f64,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:>4} ({:>6.2}h, hod {:>5.2}) | load={:.2} kW  pv={:.2} kW  grid={:.2} kW  \
             bat={:>6.2} kW | SoC={:.2} kWh ({:.1}%){}{}",
            self.slice,
            self.elapsed_hours,
            self.hour_of_day,
            self.load_ac_kw,
            self.pv_kw,
            self.grid_kw,
            self.battery_kw,
            self.soc_kwh,
            self.soc_pct,
            if self.is_day { " day" } else { "" },
            if self.in_grid { " grid" } else { "" },
        )
    }
}

/// Chronological sequence of slice records produced by one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SimulationTrace(pub Vec<StepRecord>);

impl SimulationTrace {
    /// Number of slices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.0
    }

    /// `(elapsed_hours, soc_pct)` pairs, the series used for SOC charting.
    pub fn soc_series(&self) -> Vec<(f64, f64)> {
        self.0
            .iter()
            .map(|r| (r.elapsed_hours, r.soc_pct))
            .collect()
    }
}

/// Output of [`crate::sim::engine::simulate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    pub trace: SimulationTrace,
    pub summary: SimulationSummary,
}
