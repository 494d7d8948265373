pub mod engine;
/// Append-only per-hour results table.
pub mod results;
/// Post-hoc run summary metrics.
pub mod summary;
pub mod types;

pub use engine::{Engine, run_scenario};
pub use results::{HourNotFound, SimResults};
pub use summary::RunSummary;
