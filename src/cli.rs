//! Command-line arguments for the `hybrid-pv-sim` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, ScenarioConfig};

/// Hybrid solar, battery, and grid sizing estimator.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Load the scenario from a TOML file.
    #[clap(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, off_grid, no_pv_cap).
    #[clap(long)]
    pub preset: Option<String>,

    /// Override the simulated duration in days.
    #[clap(long)]
    pub days: Option<f64>,

    /// Export the per-slice trace to CSV.
    #[clap(long)]
    pub trace_out: Option<PathBuf>,

    /// Print one line per simulated slice.
    #[clap(long)]
    pub print_trace: bool,

    /// Start the REST API after the run.
    #[cfg(feature = "api")]
    #[clap(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[clap(long, default_value = "3000", env = "HYBRID_PV_SIM_PORT")]
    pub port: u16,
}

impl Args {
    /// Resolves the scenario source: `--scenario`, then `--preset`, then `baseline`,
    /// with `--days` applied on top.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be loaded or the preset is unknown.
    pub fn load_scenario(&self) -> Result<ScenarioConfig, ConfigError> {
        let mut scenario = match (&self.scenario, &self.preset) {
            (Some(path), _) => ScenarioConfig::from_toml_file(path)?,
            (None, Some(name)) => ScenarioConfig::from_preset(name)?,
            (None, None) => ScenarioConfig::baseline(),
        };
        if let Some(days) = self.days {
            scenario.simulation.days = days;
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_baseline() {
        let args = Args::try_parse_from(["hybrid-pv-sim"]).unwrap();
        assert!(args.scenario.is_none());
        assert!(args.preset.is_none());
        let cfg = args.load_scenario().unwrap();
        assert!(cfg.grid.enabled);
        assert_eq!(cfg.simulation.days, 3.0);
    }

    #[test]
    fn supports_preset() {
        let args = Args::try_parse_from(["hybrid-pv-sim", "--preset", "off_grid"]).unwrap();
        assert_eq!(args.preset.as_deref(), Some("off_grid"));
        assert!(!args.load_scenario().unwrap().grid.enabled);
    }

    #[test]
    fn scenario_and_preset_conflict() {
        let res = Args::try_parse_from([
            "hybrid-pv-sim",
            "--scenario",
            "scenario.toml",
            "--preset",
            "baseline",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn days_override_applies() {
        let args = Args::try_parse_from(["hybrid-pv-sim", "--days", "1.5"]).unwrap();
        assert_eq!(args.load_scenario().unwrap().simulation.days, 1.5);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let args = Args::try_parse_from(["hybrid-pv-sim", "--preset", "nope"]).unwrap();
        let err = args.load_scenario().unwrap_err();
        assert_eq!(err.field, "preset");
    }

    #[test]
    fn trace_flags() {
        let args = Args::try_parse_from([
            "hybrid-pv-sim",
            "--trace-out",
            "trace.csv",
            "--print-trace",
        ])
        .unwrap();
        assert!(args.print_trace);
        assert_eq!(
            args.trace_out.as_deref().and_then(|p| p.to_str()),
            Some("trace.csv")
        );
    }
}
