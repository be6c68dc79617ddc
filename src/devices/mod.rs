//! Physical component models for the hybrid installation.

/// Battery bank ratings and charge/discharge clamping.
pub mod battery;
/// Grid connection window and assist dispatch.
pub mod grid;
/// Day/night AC load.
pub mod load;
/// Half-sine PV generation profile.
pub mod solar;
pub mod types;

// Re-export the main types for convenience
pub use battery::{BatteryBank, BatteryStep};
pub use grid::{GridAssist, GridSupply};
pub use load::AcLoad;
pub use solar::HalfSinePv;
pub use types::HourWindow;
