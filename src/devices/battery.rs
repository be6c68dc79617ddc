//! Battery bank energy model and per-slice charge/discharge clamping.

use std::fmt;

use serde::Serialize;

use crate::sim::types::{BatteryTopology, SystemParameters};

/// Floor for usable energy so downstream divisions never see zero (kWh).
pub const MIN_USABLE_KWH: f64 = 1e-4;

/// Tolerance above a power limit before a slice counts as a violation (kW).
pub const LIMIT_TOLERANCE_KW: f64 = 1e-6;

/// Nominal bank energy in kWh: `S * cell_v * P * cell_ah / 1000`.
///
/// Inputs are assumed non-negative.
pub fn nominal_energy_kwh(series: u32, parallel: u32, cell_v: f64, cell_ah: f64) -> f64 {
    f64::from(series) * cell_v * f64::from(parallel) * cell_ah / 1000.0
}

/// DC power allowed by a C-rate in kW: `c_rate * ah * v / 1000`.
pub fn rated_power_kw(c_rate: f64, ah: f64, v: f64) -> f64 {
    c_rate * ah * v / 1000.0
}

/// Derived ratings of a series/parallel battery bank.
///
/// Recomputed from [`SystemParameters`] whenever battery inputs change; it
/// holds no state of its own.
///
/// # Invariants
/// - `usable_kwh <= nominal_kwh` whenever `nominal_kwh >= MIN_USABLE_KWH`
/// - `usable_kwh >= MIN_USABLE_KWH`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryBank {
    pub topology: BatteryTopology,
    /// Bank voltage `S * cell_v` (V).
    pub bank_voltage_v: f64,
    /// Bank capacity `P * cell_ah` (Ah).
    pub bank_capacity_ah: f64,
    /// Nominal energy (kWh).
    pub nominal_kwh: f64,
    /// Usable energy at the configured depth of discharge (kWh).
    pub usable_kwh: f64,
    /// Depth of discharge used for `usable_kwh`.
    pub depth_of_discharge: f64,
    /// Charge power limit from the charge C-rate (kW).
    pub max_charge_kw: f64,
    /// Discharge power limit from the discharge C-rate (kW).
    pub max_discharge_kw: f64,
}

/// Result of resolving one slice of battery flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryStep {
    /// Power actually moved after clamping (kW, positive magnitude).
    pub power_kw: f64,
    /// Stored energy after the slice (kWh).
    pub soc_kwh: f64,
    /// The unclamped demand exceeded the C-rate limit.
    pub limit_exceeded: bool,
}

impl BatteryBank {
    /// Derives the bank ratings from the parameter snapshot.
    pub fn from_parameters(params: &SystemParameters) -> Self {
        Self::new(
            params.battery,
            params.depth_of_discharge,
            params.c_rate_charge,
            params.c_rate_discharge,
        )
    }

    pub fn new(
        topology: BatteryTopology,
        depth_of_discharge: f64,
        c_rate_charge: f64,
        c_rate_discharge: f64,
    ) -> Self {
        let bank_voltage_v = f64::from(topology.series) * topology.cell_voltage;
        let bank_capacity_ah = f64::from(topology.parallel) * topology.cell_capacity_ah;
        let nominal_kwh = nominal_energy_kwh(
            topology.series,
            topology.parallel,
            topology.cell_voltage,
            topology.cell_capacity_ah,
        );

        Self {
            topology,
            bank_voltage_v,
            bank_capacity_ah,
            nominal_kwh,
            usable_kwh: (nominal_kwh * depth_of_discharge).max(MIN_USABLE_KWH),
            depth_of_discharge,
            max_charge_kw: rated_power_kw(c_rate_charge, bank_capacity_ah, bank_voltage_v),
            max_discharge_kw: rated_power_kw(c_rate_discharge, bank_capacity_ah, bank_voltage_v),
        }
    }

    /// Absorbs up to `desired_kw` of surplus for one slice.
    ///
    /// Power is clamped to the charge limit, then to the headroom left below
    /// `usable_kwh`. The round-trip loss is applied here, on the way in.
    pub fn charge(&self, prev_kwh: f64, desired_kw: f64, rt_eff: f64, dt_hours: f64) -> BatteryStep {
        let proposed_kw = desired_kw.min(self.max_charge_kw);
        let room_kwh = self.usable_kwh - prev_kwh;
        let max_by_room_kw = room_kwh / (rt_eff * dt_hours);
        let power_kw = proposed_kw.min(max_by_room_kw);

        BatteryStep {
            power_kw,
            soc_kwh: prev_kwh + power_kw * rt_eff * dt_hours,
            limit_exceeded: desired_kw > self.max_charge_kw + LIMIT_TOLERANCE_KW,
        }
    }

    /// Supplies up to `desired_kw` of deficit for one slice.
    ///
    /// Power is clamped to the discharge limit, then to what the stored
    /// energy can deliver, so the result never drops below zero.
    pub fn discharge(
        &self,
        prev_kwh: f64,
        desired_kw: f64,
        rt_eff: f64,
        dt_hours: f64,
    ) -> BatteryStep {
        let proposed_kw = desired_kw.min(self.max_discharge_kw);
        let max_by_soc_kw = (prev_kwh / rt_eff / dt_hours).max(0.0);
        let power_kw = proposed_kw.min(max_by_soc_kw);

        BatteryStep {
            power_kw,
            // rounding in the division above can overshoot the stored energy by an ulp
            soc_kwh: (prev_kwh - power_kw * rt_eff * dt_hours).max(0.0),
            limit_exceeded: desired_kw > self.max_discharge_kw + LIMIT_TOLERANCE_KW,
        }
    }
}

impl fmt::Display for BatteryBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bank: {}S x {}P of {:.1} V, {:.0} Ah -> {:.1} V x {:.0} Ah = {:.1} kWh nominal, \
             {:.1} kWh usable @ DoD {:.0}%. Charge limit {:.2} kW, discharge limit {:.2} kW.",
            self.topology.series,
            self.topology.parallel,
            self.topology.cell_voltage,
            self.topology.cell_capacity_ah,
            self.bank_voltage_v,
            self.bank_capacity_ah,
            self.nominal_kwh,
            self.usable_kwh,
            self.depth_of_discharge * 100.0,
            self.max_charge_kw,
            self.max_discharge_kw,
        )
    }
}
