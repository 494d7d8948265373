//! Device models for the vessel's power system.

/// Shipboard battery storage model.
pub mod battery;
/// Diesel generator set model.
pub mod diesel;
/// Main propulsion motor model.
pub mod motor;
/// Deck-mounted solar array model.
pub mod solar;
pub mod types;

// Re-export the main types for convenience
pub use battery::Battery;
pub use diesel::DieselGenerator;
pub use motor::PropulsionMotor;
pub use solar::SolarArray;
pub use types::Device;
pub use types::UsageSchedule;
