/// Fixed 15-minute slice clock.
pub mod clock;
pub mod engine;
/// DC bus balance before grid and battery dispatch.
pub mod power_balance;
/// Run totals and violation counters.
pub mod summary;
pub mod types;

pub use engine::{Engine, simulate};
pub use summary::SimulationSummary;
pub use types::{SimulationRun, SimulationTrace, StepRecord, SystemParameters};
