//! Aggregate energy figures and limit-violation counters for one run.

use std::fmt;

use serde::Serialize;

use crate::devices::BatteryBank;

/// Totals accumulated over a complete simulation run.
///
/// Violation counters are diagnostics: a run always completes, and the
/// counters only record how often unclamped demand exceeded a C-rate limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationSummary {
    /// PV DC energy generated (kWh).
    pub pv_kwh: f64,
    /// Grid energy booked, load share plus offered headroom (kWh).
    pub grid_kwh: f64,
    /// AC load energy served (kWh).
    pub load_ac_kwh: f64,
    /// Battery discharge energy (kWh).
    pub battery_discharge_kwh: f64,
    /// Battery charge energy (kWh).
    pub battery_charge_kwh: f64,
    /// Slices where surplus exceeded the charge limit.
    pub charge_violations: usize,
    /// Slices where deficit exceeded the discharge limit.
    pub discharge_violations: usize,
    /// Charge power limit (kW).
    pub max_charge_kw: f64,
    /// Discharge power limit (kW).
    pub max_discharge_kw: f64,
    /// Bank nominal energy (kWh).
    pub nominal_kwh: f64,
    /// Bank usable energy (kWh).
    pub usable_kwh: f64,
}

/// Energy flows resolved in one slice, as booked by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SliceFlows {
    /// PV DC output (kW).
    pub pv_kw: f64,
    /// Grid power booked (kW).
    pub grid_kw: f64,
    /// AC load (kW).
    pub load_ac_kw: f64,
    /// Battery charge power (kW).
    pub charge_kw: f64,
    /// Battery discharge power (kW).
    pub discharge_kw: f64,
    pub charge_violation: bool,
    pub discharge_violation: bool,
}

impl SimulationSummary {
    /// Starts an empty summary carrying the bank's ratings.
    pub fn for_bank(bank: &BatteryBank) -> Self {
        Self {
            max_charge_kw: bank.max_charge_kw,
            max_discharge_kw: bank.max_discharge_kw,
            nominal_kwh: bank.nominal_kwh,
            usable_kwh: bank.usable_kwh,
            ..Self::default()
        }
    }

    /// Adds one slice worth of energy and violation counts.
    pub fn accumulate(&mut self, flows: &SliceFlows, dt_hours: f64) {
        self.pv_kwh += flows.pv_kw * dt_hours;
        self.grid_kwh += flows.grid_kw * dt_hours;
        self.load_ac_kwh += flows.load_ac_kw * dt_hours;
        self.battery_charge_kwh += flows.charge_kw * dt_hours;
        self.battery_discharge_kwh += flows.discharge_kw * dt_hours;
        if flows.charge_violation {
            self.charge_violations += 1;
        }
        if flows.discharge_violation {
            self.discharge_violations += 1;
        }
    }

    /// Whether either limit was exceeded at least once.
    pub fn has_violations(&self) -> bool {
        self.charge_violations > 0 || self.discharge_violations > 0
    }

    /// Human-readable violation line.
    pub fn violation_text(&self) -> String {
        if self.has_violations() {
            format!(
                "Violations: charge {} / discharge {}",
                self.charge_violations, self.discharge_violations
            )
        } else {
            "No violations".to_string()
        }
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Simulation Summary ---")?;
        writeln!(f, "PV energy:             {:.2} kWh", self.pv_kwh)?;
        writeln!(f, "Grid energy:           {:.2} kWh", self.grid_kwh)?;
        writeln!(f, "AC load energy:        {:.2} kWh", self.load_ac_kwh)?;
        writeln!(f, "Battery charge:        {:.2} kWh", self.battery_charge_kwh)?;
        writeln!(f, "Battery discharge:     {:.2} kWh", self.battery_discharge_kwh)?;
        writeln!(f, "Charge limit:          {:.2} kW", self.max_charge_kw)?;
        writeln!(f, "Discharge limit:       {:.2} kW", self.max_discharge_kw)?;
        writeln!(
            f,
            "Bank energy:           {:.1} kWh nominal / {:.1} kWh usable",
            self.nominal_kwh, self.usable_kwh
        )?;
        write!(f, "{}", self.violation_text())
    }
}
