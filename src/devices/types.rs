//! Common time-of-day helpers shared by the device models.

/// Hours in one day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Maps elapsed hours onto `[0, 24)`, also for negative inputs.
pub fn hour_of_day(elapsed_hours: f64) -> f64 {
    ((elapsed_hours % HOURS_PER_DAY) + HOURS_PER_DAY) % HOURS_PER_DAY
}

/// A half-open hour-of-day window `[start_h, end_h)`.
///
/// When `end_h < start_h` the window spans midnight. A window whose bounds
/// coincide has zero length. Bounds equal only mod 24, such as `0..24`,
/// also have zero length yet contain every hour; configuration rejects them.
///
/// # Examples
///
/// ```
/// use hybrid_pv_sim::devices::types::HourWindow;
///
/// let night = HourWindow::new(17.0, 6.0);
/// assert_eq!(night.duration_hours(), 13.0);
/// assert!(night.contains(23.0));
/// assert!(!night.contains(12.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourWindow {
    pub start_h: f64,
    pub end_h: f64,
}

impl HourWindow {
    pub fn new(start_h: f64, end_h: f64) -> Self {
        Self { start_h, end_h }
    }

    /// Window length in hours, `(end - start + 24) mod 24`.
    pub fn duration_hours(&self) -> f64 {
        (self.end_h - self.start_h + HOURS_PER_DAY) % HOURS_PER_DAY
    }

    /// Whether `hour` (already reduced to `[0, 24)`) falls inside the window.
    pub fn contains(&self, hour: f64) -> bool {
        if self.start_h < self.end_h {
            hour >= self.start_h && hour < self.end_h
        } else if self.start_h > self.end_h {
            hour >= self.start_h || hour < self.end_h
        } else {
            false
        }
    }

    /// Hours since the window opened, wrapped onto `[0, 24)`.
    pub fn offset_hours(&self, hour: f64) -> f64 {
        hour_of_day(hour - self.start_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_of_day_wraps_both_directions() {
        assert_eq!(hour_of_day(0.0), 0.0);
        assert_eq!(hour_of_day(25.5), 1.5);
        assert_eq!(hour_of_day(48.0), 0.0);
        assert_eq!(hour_of_day(-1.0), 23.0);
    }

    #[test]
    fn plain_window() {
        let w = HourWindow::new(6.0, 17.0);
        assert_eq!(w.duration_hours(), 11.0);
        assert!(w.contains(6.0));
        assert!(w.contains(16.75));
        assert!(!w.contains(17.0));
        assert!(!w.contains(5.75));
    }

    #[test]
    fn wrapped_window() {
        let w = HourWindow::new(20.0, 4.0);
        assert_eq!(w.duration_hours(), 8.0);
        assert!(w.contains(20.0));
        assert!(w.contains(0.0));
        assert!(w.contains(3.75));
        assert!(!w.contains(4.0));
        assert!(!w.contains(12.0));
        assert_eq!(w.offset_hours(2.0), 6.0);
    }

    #[test]
    fn empty_window() {
        let w = HourWindow::new(8.0, 8.0);
        assert_eq!(w.duration_hours(), 0.0);
        assert!(!w.contains(8.0));
        assert!(!w.contains(0.0));
    }
}
