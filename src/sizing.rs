//! Closed-form average-day sizing, with no grid contribution.

use std::fmt;

use serde::Serialize;

use crate::devices::HourWindow;
use crate::devices::load::ac_power_kw;
use crate::devices::types::HOURS_PER_DAY;
use crate::sim::types::SystemParameters;

/// Headline sizing figures for an average day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageSizingResult {
    /// Daylight window length (h).
    pub daylight_hours: f64,
    /// `24 - daylight_hours` (h).
    pub night_hours: f64,
    /// AC load during daylight (kW).
    pub day_power_kw: f64,
    /// AC load at night (kW).
    pub night_power_kw: f64,
    /// AC energy per day (kWh).
    pub daily_ac_kwh: f64,
    /// DC-equivalent energy per day (kWh).
    pub daily_dc_kwh: f64,
    /// AC energy over one night (kWh).
    pub nightly_ac_kwh: f64,
    /// DC-equivalent energy over one night (kWh).
    pub nightly_dc_kwh: f64,
    /// Usable battery energy needed for one night (kWh).
    pub usable_needed_one_night_kwh: f64,
    /// Nominal battery energy needed for one night (kWh).
    pub nominal_needed_one_night_kwh: f64,
    /// Nominal battery energy needed for every night of autonomy (kWh).
    pub nominal_needed_kwh: f64,
    /// PV array needed to cover the daily DC energy without grid (kW).
    pub pv_required_no_grid_kw: f64,
}

/// PV array (kW) that yields `daily_dc_kwh` per day.
///
/// Requires `peak_sun_hours * derate > 0`; the division is not guarded.
pub fn pv_required_kw(daily_dc_kwh: f64, peak_sun_hours: f64, derate: f64) -> f64 {
    daily_dc_kwh / (peak_sun_hours * derate)
}

/// Estimates average-day sizing for `params`.
///
/// A `sun_end_hour` before `sun_start_hour` is a daylight window spanning
/// midnight. Night is the only period battery autonomy has to cover, and
/// the requirement scales linearly with the nights of autonomy.
pub fn estimate_average_sizing(params: &SystemParameters) -> AverageSizingResult {
    let daylight_hours =
        HourWindow::new(params.sun_start_hour, params.sun_end_hour).duration_hours();
    let night_hours = HOURS_PER_DAY - daylight_hours;

    let day_power_kw = ac_power_kw(params.ac_voltage, params.day_current_a);
    let night_power_kw = ac_power_kw(params.ac_voltage, params.night_current_a);
    let daily_ac_kwh = day_power_kw * daylight_hours + night_power_kw * night_hours;
    let daily_dc_kwh = daily_ac_kwh / params.inverter_efficiency;

    let nightly_ac_kwh = night_power_kw * night_hours;
    let nightly_dc_kwh = nightly_ac_kwh / params.inverter_efficiency;

    let usable_needed_one_night_kwh = nightly_dc_kwh / params.round_trip_efficiency;
    let nominal_needed_one_night_kwh = usable_needed_one_night_kwh / params.depth_of_discharge;
    let nominal_needed_kwh = nominal_needed_one_night_kwh * f64::from(params.nights_of_autonomy);

    AverageSizingResult {
        daylight_hours,
        night_hours,
        day_power_kw,
        night_power_kw,
        daily_ac_kwh,
        daily_dc_kwh,
        nightly_ac_kwh,
        nightly_dc_kwh,
        usable_needed_one_night_kwh,
        nominal_needed_one_night_kwh,
        nominal_needed_kwh,
        pv_required_no_grid_kw: pv_required_kw(
            daily_dc_kwh,
            params.peak_sun_hours,
            params.pv_derate,
        ),
    }
}

impl fmt::Display for AverageSizingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Average Day Sizing ---")?;
        writeln!(
            f,
            "Daylight / night:      {:.2} h / {:.2} h",
            self.daylight_hours, self.night_hours
        )?;
        writeln!(f, "Day load:              {:.2} kW", self.day_power_kw)?;
        writeln!(f, "Night load:            {:.2} kW", self.night_power_kw)?;
        writeln!(
            f,
            "Daily energy:          {:.1} kWh AC / {:.1} kWh DC",
            self.daily_ac_kwh, self.daily_dc_kwh
        )?;
        writeln!(
            f,
            "Nightly energy:        {:.1} kWh AC / {:.1} kWh DC",
            self.nightly_ac_kwh, self.nightly_dc_kwh
        )?;
        writeln!(
            f,
            "Battery (1 night):     {:.1} kWh usable / {:.1} kWh nominal",
            self.usable_needed_one_night_kwh, self.nominal_needed_one_night_kwh
        )?;
        writeln!(f, "Battery (autonomy):    {:.1} kWh nominal", self.nominal_needed_kwh)?;
        write!(f, "PV required (no grid): {:.1} kW", self.pv_required_no_grid_kw)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::ScenarioConfig;

    fn baseline() -> SystemParameters {
        ScenarioConfig::baseline().to_parameters()
    }

    #[test]
    fn baseline_daily_energy() {
        let s = estimate_average_sizing(&baseline());
        assert_eq!(s.daylight_hours, 11.0);
        assert_eq!(s.night_hours, 13.0);
        assert_relative_eq!(s.day_power_kw, 2.3, epsilon = 1e-9);
        assert_relative_eq!(s.daily_ac_kwh, 55.2, epsilon = 1e-9);
        assert_relative_eq!(s.daily_dc_kwh, 60.0, epsilon = 1e-9);
        assert_relative_eq!(s.nightly_ac_kwh, 29.9, epsilon = 1e-9);
        assert_relative_eq!(s.nightly_dc_kwh, 32.5, epsilon = 1e-9);
    }

    #[test]
    fn baseline_battery_requirement() {
        let s = estimate_average_sizing(&baseline());
        assert_relative_eq!(s.usable_needed_one_night_kwh, 32.5 / 0.85, epsilon = 1e-9);
        assert_relative_eq!(
            s.nominal_needed_one_night_kwh,
            32.5 / 0.85 / 0.5,
            epsilon = 1e-9
        );
        assert_relative_eq!(s.nominal_needed_kwh, 3.0 * 32.5 / 0.85 / 0.5, epsilon = 1e-9);
    }

    #[test]
    fn autonomy_scales_linearly() {
        let mut p = baseline();
        p.nights_of_autonomy = 1;
        let one = estimate_average_sizing(&p);
        p.nights_of_autonomy = 5;
        let five = estimate_average_sizing(&p);
        assert_relative_eq!(five.nominal_needed_kwh, 5.0 * one.nominal_needed_kwh, epsilon = 1e-9);
    }

    #[test]
    fn baseline_pv_requirement() {
        let s = estimate_average_sizing(&baseline());
        assert_relative_eq!(s.pv_required_no_grid_kw, 60.0 / (5.5 * 0.75), epsilon = 1e-9);
    }

    #[test]
    fn wrapped_daylight_window() {
        let mut p = baseline();
        p.sun_start_hour = 20.0;
        p.sun_end_hour = 4.0;
        let s = estimate_average_sizing(&p);
        assert_eq!(s.daylight_hours, 8.0);
        assert_eq!(s.night_hours, 16.0);
    }

    #[test]
    fn night_energy_ignores_day_current() {
        let mut p = baseline();
        p.day_current_a = 50.0;
        let s = estimate_average_sizing(&p);
        assert_relative_eq!(s.nightly_ac_kwh, 29.9, epsilon = 1e-9);
        assert!(s.daily_ac_kwh > 55.2);
    }

    #[test]
    fn display_does_not_panic() {
        let text = estimate_average_sizing(&baseline()).to_string();
        assert!(text.contains("PV required (no grid): 14.5 kW"));
    }
}
