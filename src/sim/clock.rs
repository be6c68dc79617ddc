/// Fixed slice duration in minutes.
pub const SLICE_MINUTES: f64 = 15.0;

/// Fixed slice duration in hours.
pub const SLICE_HOURS: f64 = SLICE_MINUTES / 60.0;

/// Number of slices needed to cover `sim_days`, never fewer than one.
///
/// # Examples
///
/// ```
/// use hybrid_pv_sim::sim::clock::slice_count;
///
/// assert_eq!(slice_count(1.0), 96);
/// assert_eq!(slice_count(0.0), 1);
/// ```
pub fn slice_count(sim_days: f64) -> usize {
    let raw = (sim_days * 24.0 * 60.0 / SLICE_MINUTES).round();
    if raw.is_finite() && raw >= 1.0 {
        raw as usize
    } else {
        1
    }
}

/// Hours elapsed at the start of slice `index`.
pub fn elapsed_hours(index: usize) -> f64 {
    index as f64 * SLICE_HOURS
}

/// A simulation clock that walks a fixed number of 15-minute slices.
///
/// # Examples
///
/// ```
/// use hybrid_pv_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(3);
/// let mut steps = Vec::new();
///
/// clock.run(|step| steps.push(step));
/// assert_eq!(steps, vec![0, 1, 2]);
/// ```
pub struct Clock {
    /// Current slice
    current: usize,
    /// Total slices to run
    total: usize,
}

impl Clock {
    /// Creates a clock with an explicit slice count.
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Creates a clock covering `sim_days` of simulated time.
    pub fn for_days(sim_days: f64) -> Self {
        Self::new(slice_count(sim_days))
    }

    /// Total slices this clock will yield.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Advances the clock by one slice.
    ///
    /// # Returns
    ///
    /// * `Some(slice)` - The slice index before advancing
    /// * `None` - If the clock has yielded every slice
    pub fn tick(&mut self) -> Option<usize> {
        if self.current < self.total {
            let step = self.current;
            self.current += 1;
            Some(step)
        } else {
            None
        }
    }

    /// Runs a function for each remaining slice.
    pub fn run(&mut self, mut f: impl FnMut(usize)) {
        while let Some(step) = self.tick() {
            f(step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock() {
        let clock = Clock::new(5);
        assert_eq!(clock.current, 0);
        assert_eq!(clock.total, 5);
    }

    #[test]
    fn test_tick() {
        let mut clock = Clock::new(2);
        assert_eq!(clock.tick(), Some(0));
        assert_eq!(clock.tick(), Some(1));
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_for_days() {
        assert_eq!(Clock::for_days(3.0).total(), 288);
        assert_eq!(Clock::for_days(0.5).total(), 48);
    }

    #[test]
    fn slice_count_rounds_fractional_days() {
        // 0.01 days = 14.4 minutes, rounds to one slice
        assert_eq!(slice_count(0.01), 1);
        // 0.0125 days = 18 minutes, rounds to one slice
        assert_eq!(slice_count(0.0125), 1);
        // 0.02 days = 28.8 minutes, rounds to two slices
        assert_eq!(slice_count(0.02), 2);
    }

    #[test]
    fn slice_count_never_below_one() {
        assert_eq!(slice_count(0.0), 1);
        assert_eq!(slice_count(-2.0), 1);
        assert_eq!(slice_count(f64::NAN), 1);
    }

    #[test]
    fn elapsed_hours_is_quarter_hour_steps() {
        assert_eq!(elapsed_hours(0), 0.0);
        assert_eq!(elapsed_hours(4), 1.0);
        assert_eq!(elapsed_hours(97), 24.25);
    }
}
