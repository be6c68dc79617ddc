//! Time-stepped energy balance engine: PV, load, grid assist, and battery per slice.

use tracing::debug;

use crate::devices::types::hour_of_day;
use crate::devices::{AcLoad, BatteryBank, GridSupply, HalfSinePv, HourWindow};

use super::clock::{Clock, SLICE_HOURS, elapsed_hours};
use super::power_balance::net_dc_kw;
use super::summary::{SimulationSummary, SliceFlows};
use super::types::{SimulationRun, SimulationTrace, StepRecord, SystemParameters};

/// Runs one simulation of `params` with a PV array of `array_kw`.
///
/// Pure: identical inputs always produce identical output.
pub fn simulate(params: &SystemParameters, array_kw: f64) -> SimulationRun {
    Engine::new(params, array_kw).run()
}

/// Simulation engine holding the device models derived from one parameter snapshot.
///
/// The engine has no mutable state; every run starts from a full bank.
#[derive(Debug, Clone)]
pub struct Engine {
    bank: BatteryBank,
    pv: HalfSinePv,
    load: AcLoad,
    grid: GridSupply,
    daylight: HourWindow,
    inverter_efficiency: f64,
    round_trip_efficiency: f64,
    sim_days: f64,
}

impl Engine {
    /// Builds the device models for a run.
    ///
    /// # Arguments
    ///
    /// * `params` - Immutable parameter snapshot
    /// * `array_kw` - Resolved PV array size (kW)
    pub fn new(params: &SystemParameters, array_kw: f64) -> Self {
        let daylight = HourWindow::new(params.sun_start_hour, params.sun_end_hour);
        Self {
            bank: BatteryBank::from_parameters(params),
            pv: HalfSinePv::new(array_kw, params.pv_derate, params.peak_sun_hours, daylight),
            load: AcLoad::new(
                params.ac_voltage,
                params.day_current_a,
                params.night_current_a,
            ),
            grid: GridSupply::new(&params.grid),
            daylight,
            inverter_efficiency: params.inverter_efficiency,
            round_trip_efficiency: params.round_trip_efficiency,
            sim_days: params.sim_days,
        }
    }

    /// Battery ratings used by this engine.
    pub fn bank(&self) -> &BatteryBank {
        &self.bank
    }

    /// Resolves slice `slice` given the stored energy at the end of the previous slice.
    ///
    /// Order: window tests, load, PV, net DC balance, grid assist, battery.
    /// Slice 0 books its flows but its stored energy stays pinned at the
    /// usable capacity.
    ///
    /// # Returns
    ///
    /// The slice record and the flows to accumulate into the summary.
    pub fn step(&self, slice: usize, prev_soc_kwh: f64) -> (StepRecord, SliceFlows) {
        let usable_kwh = self.bank.usable_kwh;
        let rt_eff = self.round_trip_efficiency;
        let elapsed = elapsed_hours(slice);
        let hod = hour_of_day(elapsed);

        // 1. Window tests
        let is_day = self.daylight.contains(hod);
        let in_grid = self.grid.contains(hod);

        // 2. Load
        let load_ac_kw = self.load.power_kw(is_day);

        // 3. PV
        let pv_kw = self.pv.power_kw(hod);

        // 4. Net DC balance
        let mut net_kw = net_dc_kw(pv_kw, load_ac_kw, self.inverter_efficiency);

        // 5. Grid assist: deficit first, remaining capacity becomes surplus
        let mut grid_kw = 0.0;
        if in_grid {
            let assist = self.grid.assist(net_kw, self.inverter_efficiency);
            net_kw += assist.for_load_kw;
            net_kw += assist.headroom_kw;
            grid_kw = assist.total_kw();
        }

        // 6. Battery
        let prev_kwh = if slice == 0 { usable_kwh } else { prev_soc_kwh };
        let mut flows = SliceFlows {
            pv_kw,
            grid_kw,
            load_ac_kw,
            ..SliceFlows::default()
        };
        let (battery_kw, next_kwh) = if net_kw >= 0.0 {
            let step = self.bank.charge(prev_kwh, net_kw, rt_eff, SLICE_HOURS);
            flows.charge_kw = step.power_kw;
            flows.charge_violation = step.limit_exceeded;
            (step.power_kw, step.soc_kwh)
        } else {
            let step = self.bank.discharge(prev_kwh, -net_kw, rt_eff, SLICE_HOURS);
            flows.discharge_kw = step.power_kw;
            flows.discharge_violation = step.limit_exceeded;
            (-step.power_kw, step.soc_kwh)
        };

        // 7. Full bank at start
        let soc_kwh = if slice == 0 { usable_kwh } else { next_kwh };

        // 8. Percentage of usable capacity
        let soc_pct = if usable_kwh > 0.0 {
            soc_kwh / usable_kwh * 100.0
        } else {
            0.0
        };

        let record = StepRecord {
            slice,
            elapsed_hours: elapsed,
            hour_of_day: hod,
            is_day,
            in_grid,
            load_ac_kw,
            pv_kw,
            grid_kw,
            battery_kw,
            soc_kwh,
            soc_pct,
        };
        (record, flows)
    }

    /// Executes every slice and returns the trace with its summary.
    pub fn run(&self) -> SimulationRun {
        let mut clock = Clock::for_days(self.sim_days);
        let mut records = Vec::with_capacity(clock.total());
        let mut summary = SimulationSummary::for_bank(&self.bank);
        let mut soc_kwh = self.bank.usable_kwh;

        clock.run(|slice| {
            let (record, flows) = self.step(slice, soc_kwh);
            summary.accumulate(&flows, SLICE_HOURS);
            soc_kwh = record.soc_kwh;
            records.push(record);
        });

        debug!(
            slices = records.len(),
            array_kw = self.pv.array_kw,
            pv_kwh = summary.pv_kwh,
            grid_kwh = summary.grid_kwh,
            charge_violations = summary.charge_violations,
            discharge_violations = summary.discharge_violations,
            "simulation finished"
        );

        SimulationRun {
            trace: SimulationTrace(records),
            summary,
        }
    }
}
