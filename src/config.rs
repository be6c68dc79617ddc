//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::devices::HourWindow;
use crate::sim::types::{BatteryTopology, GridParameters, SystemParameters};

/// Longest accepted simulation (days); the trace is held in memory.
pub const MAX_SIM_DAYS: f64 = 366.0;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// AC load parameters.
    #[serde(default)]
    pub load: LoadConfig,
    /// Daylight window and PV yield.
    #[serde(default)]
    pub sun: SunConfig,
    /// Conversion efficiencies and autonomy.
    #[serde(default)]
    pub efficiency: EfficiencyConfig,
    /// Battery bank topology and C-rates.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Existing PV array cap.
    #[serde(default)]
    pub pv: PvConfig,
    /// Grid assist window.
    #[serde(default)]
    pub grid: GridConfig,
    /// Simulation duration.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// AC load parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// AC bus voltage (V).
    pub ac_voltage: f64,
    /// Load current during daylight (A).
    pub day_current_a: f64,
    /// Load current at night (A).
    pub night_current_a: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            ac_voltage: 230.0,
            day_current_a: 10.0,
            night_current_a: 10.0,
        }
    }
}

/// Daylight window and PV yield.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SunConfig {
    /// Daylight start, hour of day.
    pub start_hour: f64,
    /// Daylight end, hour of day (exclusive; may be before `start_hour`).
    pub end_hour: f64,
    /// Peak sun hours per day.
    pub peak_sun_hours: f64,
    /// PV derating factor (0.0–1.0).
    pub derate: f64,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            start_hour: 6.0,
            end_hour: 17.0,
            peak_sun_hours: 5.5,
            derate: 0.75,
        }
    }
}

/// Conversion efficiencies and autonomy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EfficiencyConfig {
    /// Inverter efficiency (0.0–1.0).
    pub inverter: f64,
    /// Battery round-trip efficiency (0.0–1.0).
    pub round_trip: f64,
    /// Usable fraction of nominal battery energy (0.0–1.0).
    pub depth_of_discharge: f64,
    /// Nights the bank must cover without PV.
    pub nights_of_autonomy: u32,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            inverter: 0.92,
            round_trip: 0.85,
            depth_of_discharge: 0.5,
            nights_of_autonomy: 3,
        }
    }
}

/// Battery bank topology and C-rates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Cells in series.
    pub series: u32,
    /// Parallel strings.
    pub parallel: u32,
    /// Cell voltage (V).
    pub cell_voltage: f64,
    /// Cell capacity (Ah).
    pub cell_capacity_ah: f64,
    /// Charge C-rate.
    pub c_rate_charge: f64,
    /// Discharge C-rate.
    pub c_rate_discharge: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            series: 4,
            parallel: 4,
            cell_voltage: 12.0,
            cell_capacity_ah: 200.0,
            c_rate_charge: 0.2,
            c_rate_discharge: 0.5,
        }
    }
}

/// Existing PV array cap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PvConfig {
    /// Installed array size (kW).
    pub cap_kw: f64,
    /// Clamp the simulated array to `cap_kw`.
    pub enforce_cap: bool,
}

impl Default for PvConfig {
    fn default() -> Self {
        Self {
            cap_kw: 5.6,
            enforce_cap: true,
        }
    }
}

/// Grid assist window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Grid connection available.
    pub enabled: bool,
    /// Window start, hour of day.
    pub start_hour: f64,
    /// Window end, hour of day (wraps when `<= start_hour`).
    pub end_hour: f64,
    /// Maximum AC import (kW).
    pub max_ac_kw: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start_hour: 17.0,
            end_hour: 6.0,
            max_ac_kw: 3.0,
        }
    }
}

/// Simulation duration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Days to simulate (may be fractional, must be > 0).
    pub days: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { days: 3.0 }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"sun.peak_sun_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the off-grid preset: no grid connection at all.
    pub fn off_grid() -> Self {
        Self {
            grid: GridConfig {
                enabled: false,
                ..GridConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the no-PV-cap preset: the simulated array is the full requirement.
    pub fn no_pv_cap() -> Self {
        Self {
            pv: PvConfig {
                enforce_cap: false,
                ..PvConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "off_grid", "no_pv_cap"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "off_grid" => Ok(Self::off_grid()),
            "no_pv_cap" => Ok(Self::no_pv_cap()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let load = &self.load;
        non_negative(&mut errors, "load.ac_voltage", load.ac_voltage);
        non_negative(&mut errors, "load.day_current_a", load.day_current_a);
        non_negative(&mut errors, "load.night_current_a", load.night_current_a);

        let sun = &self.sun;
        hour(&mut errors, "sun.start_hour", sun.start_hour);
        hour(&mut errors, "sun.end_hour", sun.end_hour);
        if HourWindow::new(sun.start_hour, sun.end_hour).duration_hours() == 0.0 {
            errors.push(ConfigError::new(
                "sun.end_hour",
                "must differ from sun.start_hour (mod 24)",
            ));
        }
        if !(sun.peak_sun_hours > 0.0) {
            errors.push(ConfigError::new("sun.peak_sun_hours", "must be > 0"));
        }
        fraction(&mut errors, "sun.derate", sun.derate);

        let eff = &self.efficiency;
        fraction(&mut errors, "efficiency.inverter", eff.inverter);
        fraction(&mut errors, "efficiency.round_trip", eff.round_trip);
        fraction(&mut errors, "efficiency.depth_of_discharge", eff.depth_of_discharge);
        if eff.nights_of_autonomy == 0 {
            errors.push(ConfigError::new("efficiency.nights_of_autonomy", "must be >= 1"));
        }

        let bat = &self.battery;
        if bat.series == 0 {
            errors.push(ConfigError::new("battery.series", "must be >= 1"));
        }
        if bat.parallel == 0 {
            errors.push(ConfigError::new("battery.parallel", "must be >= 1"));
        }
        non_negative(&mut errors, "battery.cell_voltage", bat.cell_voltage);
        non_negative(&mut errors, "battery.cell_capacity_ah", bat.cell_capacity_ah);
        non_negative(&mut errors, "battery.c_rate_charge", bat.c_rate_charge);
        non_negative(&mut errors, "battery.c_rate_discharge", bat.c_rate_discharge);

        non_negative(&mut errors, "pv.cap_kw", self.pv.cap_kw);

        let grid = &self.grid;
        hour(&mut errors, "grid.start_hour", grid.start_hour);
        hour(&mut errors, "grid.end_hour", grid.end_hour);
        non_negative(&mut errors, "grid.max_ac_kw", grid.max_ac_kw);

        let days = self.simulation.days;
        if !(days > 0.0) {
            errors.push(ConfigError::new("simulation.days", "must be > 0"));
        } else if days > MAX_SIM_DAYS {
            errors.push(ConfigError::new(
                "simulation.days",
                format!("must be <= {MAX_SIM_DAYS}"),
            ));
        }

        errors
    }

    /// Builds the immutable parameter snapshot for a sizing run.
    pub fn to_parameters(&self) -> SystemParameters {
        SystemParameters {
            ac_voltage: self.load.ac_voltage,
            day_current_a: self.load.day_current_a,
            night_current_a: self.load.night_current_a,
            sun_start_hour: self.sun.start_hour,
            sun_end_hour: self.sun.end_hour,
            peak_sun_hours: self.sun.peak_sun_hours,
            pv_derate: self.sun.derate,
            inverter_efficiency: self.efficiency.inverter,
            round_trip_efficiency: self.efficiency.round_trip,
            depth_of_discharge: self.efficiency.depth_of_discharge,
            nights_of_autonomy: self.efficiency.nights_of_autonomy,
            sim_days: self.simulation.days,
            battery: BatteryTopology {
                series: self.battery.series,
                parallel: self.battery.parallel,
                cell_voltage: self.battery.cell_voltage,
                cell_capacity_ah: self.battery.cell_capacity_ah,
            },
            c_rate_charge: self.battery.c_rate_charge,
            c_rate_discharge: self.battery.c_rate_discharge,
            pv_cap_kw: self.pv.cap_kw,
            enforce_pv_cap: self.pv.enforce_cap,
            grid: GridParameters {
                enabled: self.grid.enabled,
                start_hour: self.grid.start_hour,
                end_hour: self.grid.end_hour,
                max_ac_kw: self.grid.max_ac_kw,
            },
        }
    }
}

// NaN fails every check below through the negated comparisons.
fn non_negative(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(value >= 0.0) {
        errors.push(ConfigError::new(field, "must be >= 0"));
    }
}

fn fraction(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(value > 0.0 && value <= 1.0) {
        errors.push(ConfigError::new(field, "must be in (0.0, 1.0]"));
    }
}

fn hour(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(0.0..=24.0).contains(&value) {
        errors.push(ConfigError::new(field, "must be in [0, 24]"));
    }
}
