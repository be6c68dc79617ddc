use std::f64::consts::PI;

use crate::devices::types::HourWindow;

/// A PV array with an idealised half-sine daylight profile.
///
/// Generation follows `sin` over the daylight window, scaled so that one
/// day integrates to `array_kw * derate * peak_sun_hours`. The scale factor
/// is fixed at construction and identical for every slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSinePv {
    /// Nameplate array size (kW).
    pub array_kw: f64,

    /// System derating factor (0..1).
    pub derate: f64,

    /// Daylight window the sine spans.
    pub daylight: HourWindow,

    /// `psh / (2 * daylight_hours / pi)`, zero for an empty window.
    scale: f64,
}

impl HalfSinePv {
    /// Creates a PV profile.
    ///
    /// # Arguments
    ///
    /// * `array_kw` - Nameplate array size in kW
    /// * `derate` - Derating factor applied to the nameplate
    /// * `peak_sun_hours` - Equivalent full-sun hours per day
    /// * `daylight` - Window over which the half sine is laid out
    pub fn new(array_kw: f64, derate: f64, peak_sun_hours: f64, daylight: HourWindow) -> Self {
        let area_per_day = 2.0 * daylight.duration_hours() / PI;
        let scale = if area_per_day > 0.0 {
            peak_sun_hours / area_per_day
        } else {
            0.0
        };
        Self {
            array_kw,
            derate,
            daylight,
            scale,
        }
    }

    /// Normalisation constant applied to the sine shape.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sine shape in `[0, 1]` at `hour` (hour of day), zero outside daylight.
    pub fn shape(&self, hour: f64) -> f64 {
        if !self.daylight.contains(hour) {
            return 0.0;
        }
        let phase = self.daylight.offset_hours(hour) / self.daylight.duration_hours() * PI;
        phase.sin()
    }

    /// DC output at `hour` (kW), never negative.
    pub fn power_kw(&self, hour: f64) -> f64 {
        (self.array_kw * self.derate * self.shape(hour) * self.scale).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn pv() -> HalfSinePv {
        HalfSinePv::new(5.0, 0.75, 5.5, HourWindow::new(6.0, 17.0))
    }

    #[test]
    fn test_scale_matches_sine_integral() {
        // 5.5 / (22 / pi) = pi / 4
        assert_abs_diff_eq!(pv().scale(), PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_generation_at_night() {
        let pv = pv();
        assert_eq!(pv.power_kw(0.0), 0.0);
        assert_eq!(pv.power_kw(5.75), 0.0);
        assert_eq!(pv.power_kw(17.0), 0.0);
        assert_eq!(pv.power_kw(23.0), 0.0);
    }

    #[test]
    fn test_zero_at_sunrise_and_peak_at_midday() {
        let pv = pv();
        assert_eq!(pv.power_kw(6.0), 0.0);
        let peak = pv.power_kw(11.5);
        assert_abs_diff_eq!(peak, 5.0 * 0.75 * PI / 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pv.power_kw(8.0), pv.power_kw(15.0), epsilon = 1e-9);
    }

    #[test]
    fn test_wrapped_daylight_window() {
        let pv = HalfSinePv::new(4.0, 1.0, 4.0, HourWindow::new(20.0, 4.0));
        assert!(pv.power_kw(22.0) > 0.0);
        assert!(pv.power_kw(1.0) > 0.0);
        assert_eq!(pv.power_kw(12.0), 0.0);
        // midpoint of the 8 h window is midnight
        assert_abs_diff_eq!(pv.shape(0.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_daylight_window_generates_nothing() {
        let pv = HalfSinePv::new(5.0, 0.75, 5.5, HourWindow::new(9.0, 9.0));
        assert_eq!(pv.scale(), 0.0);
        for quarter in 0..96 {
            let p = pv.power_kw(f64::from(quarter) * 0.25);
            assert_eq!(p, 0.0);
        }
    }

    #[test]
    fn test_daily_energy_close_to_rating() {
        let pv = pv();
        let energy: f64 = (0..96).map(|i| pv.power_kw(f64::from(i) * 0.25) * 0.25).sum();
        assert_abs_diff_eq!(energy, 5.0 * 0.75 * 5.5, epsilon = 0.02);
    }
}
