//! Input/output helpers for simulation results.

/// CSV export for hour records.
pub mod export;
