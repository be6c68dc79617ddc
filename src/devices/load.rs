/// AC power drawn at `volts` and `amps`, in kW.
pub fn ac_power_kw(volts: f64, amps: f64) -> f64 {
    volts * amps / 1000.0
}

/// A two-level AC load: one constant for daylight, another for night.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcLoad {
    /// Daylight draw (kW).
    pub day_kw: f64,
    /// Night draw (kW).
    pub night_kw: f64,
}

impl AcLoad {
    /// Creates a load from bus voltage and the day/night currents.
    pub fn new(ac_voltage: f64, day_current_a: f64, night_current_a: f64) -> Self {
        Self {
            day_kw: ac_power_kw(ac_voltage, day_current_a),
            night_kw: ac_power_kw(ac_voltage, night_current_a),
        }
    }

    /// AC load power for a slice.
    pub fn power_kw(&self, is_day: bool) -> f64 {
        if is_day { self.day_kw } else { self.night_kw }
    }
}
