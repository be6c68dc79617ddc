//! Grid connection model: availability window and assist dispatch.

use crate::sim::types::GridParameters;

/// Grid power booked for one slice, both DC-equivalent (kW).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridAssist {
    /// Portion covering the load deficit.
    pub for_load_kw: f64,
    /// Remaining capacity offered to the battery as extra surplus.
    pub headroom_kw: f64,
}

impl GridAssist {
    /// Total booked grid power.
    pub fn total_kw(&self) -> f64 {
        self.for_load_kw + self.headroom_kw
    }
}

/// A grid connection with a time-of-day window and an AC import cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSupply {
    enabled: bool,
    start_hour: f64,
    end_hour: f64,
    max_ac_kw: f64,
}

impl GridSupply {
    pub fn new(params: &GridParameters) -> Self {
        Self {
            enabled: params.enabled,
            start_hour: params.start_hour,
            end_hour: params.end_hour,
            max_ac_kw: params.max_ac_kw.max(0.0),
        }
    }

    /// Whether the grid can assist at `hour` (hour of day).
    ///
    /// A window with `start >= end` wraps past midnight, so equal bounds
    /// leave the grid available all day.
    pub fn contains(&self, hour: f64) -> bool {
        if !self.enabled {
            return false;
        }
        if self.start_hour < self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }

    /// Import cap (kW AC), never negative.
    pub fn max_ac_kw(&self) -> f64 {
        self.max_ac_kw
    }

    /// Splits grid capacity between the deficit in `net_kw` and battery headroom.
    ///
    /// The load share is taken first, up to the DC-equivalent capacity; the
    /// rest of the capacity is booked as headroom whether or not the battery
    /// can absorb it.
    pub fn assist(&self, net_kw: f64, inverter_efficiency: f64) -> GridAssist {
        let capacity_dc_kw = self.max_ac_kw / inverter_efficiency;
        let for_load_kw = (-net_kw).max(0.0).min(capacity_dc_kw);
        let headroom_kw = (capacity_dc_kw - for_load_kw).max(0.0);
        GridAssist {
            for_load_kw,
            headroom_kw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(enabled: bool, start: f64, end: f64, max_ac_kw: f64) -> GridSupply {
        GridSupply::new(&GridParameters {
            enabled,
            start_hour: start,
            end_hour: end,
            max_ac_kw,
        })
    }

    #[test]
    fn disabled_grid_never_available() {
        let g = grid(false, 0.0, 24.0, 3.0);
        assert!(!g.contains(0.0));
        assert!(!g.contains(12.0));
    }

    #[test]
    fn overnight_window_wraps() {
        let g = grid(true, 17.0, 6.0, 3.0);
        assert!(g.contains(17.0));
        assert!(g.contains(23.75));
        assert!(g.contains(0.0));
        assert!(g.contains(5.75));
        assert!(!g.contains(6.0));
        assert!(!g.contains(12.0));
    }

    #[test]
    fn equal_bounds_cover_whole_day() {
        let g = grid(true, 8.0, 8.0, 3.0);
        assert!(g.contains(0.0));
        assert!(g.contains(8.0));
        assert!(g.contains(20.0));
    }

    #[test]
    fn daytime_window() {
        let g = grid(true, 9.0, 15.0, 3.0);
        assert!(g.contains(9.0));
        assert!(!g.contains(15.0));
        assert!(!g.contains(3.0));
    }

    #[test]
    fn negative_cap_clamped() {
        let g = grid(true, 0.0, 12.0, -4.0);
        assert_eq!(g.max_ac_kw(), 0.0);
        assert_eq!(g.assist(-2.0, 0.9).total_kw(), 0.0);
    }

    #[test]
    fn covers_deficit_then_offers_headroom() {
        let g = grid(true, 17.0, 6.0, 3.0);
        // capacity 3.0 / 0.75 = 4.0 kW DC
        let a = g.assist(-2.5, 0.75);
        assert!((a.for_load_kw - 2.5).abs() < 1e-12);
        assert!((a.headroom_kw - 1.5).abs() < 1e-12);
        assert!((a.total_kw() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn deficit_larger_than_capacity() {
        let g = grid(true, 17.0, 6.0, 3.0);
        let a = g.assist(-10.0, 0.75);
        assert!((a.for_load_kw - 4.0).abs() < 1e-12);
        assert_eq!(a.headroom_kw, 0.0);
    }

    #[test]
    fn surplus_books_full_capacity_as_headroom() {
        let g = grid(true, 17.0, 6.0, 3.0);
        let a = g.assist(1.0, 0.75);
        assert_eq!(a.for_load_kw, 0.0);
        assert!((a.headroom_kw - 4.0).abs() < 1e-12);
    }
}
