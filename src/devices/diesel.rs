//! Diesel generator set model.

use crate::devices::types::{Device, UsageSchedule};

/// A diesel genset feeding the vessel's electrical bus.
///
/// Output follows the per-block usage schedule scaled by rated power. Fuel
/// is computed from the bus-side output: the grid conversion loss is divided
/// back out to get shaft power, then divided by the kWh-per-litre figure of
/// the engine.
#[derive(Debug, Clone)]
pub struct DieselGenerator {
    name: String,

    /// Rated power in kW.
    pub max_power_kw: f32,

    /// Genset-to-bus conversion efficiency (0..1.0].
    pub grid_efficiency: f32,

    /// Engine fuel efficiency in kWh per litre.
    pub fuel_kwh_per_litre: f32,

    /// Whether the genset is running this voyage.
    pub enabled: bool,

    usage: UsageSchedule,
}

impl DieselGenerator {
    /// Creates a new genset.
    ///
    /// # Panics
    ///
    /// Panics if `max_power_kw` is negative or `grid_efficiency` is outside
    /// `(0, 1]`. A non-positive `fuel_kwh_per_litre` is tolerated here and
    /// guarded at the fuel computation; config validation rejects it for
    /// enabled devices before an engine is built.
    pub fn new(
        name: impl Into<String>,
        max_power_kw: f32,
        grid_efficiency: f32,
        fuel_kwh_per_litre: f32,
        enabled: bool,
        usage: UsageSchedule,
    ) -> Self {
        assert!(max_power_kw >= 0.0);
        assert!(grid_efficiency > 0.0 && grid_efficiency <= 1.0);

        Self {
            name: name.into(),
            max_power_kw,
            grid_efficiency,
            fuel_kwh_per_litre,
            enabled,
            usage,
        }
    }

    /// The usage schedule driving this genset.
    pub fn usage(&self) -> &UsageSchedule {
        &self.usage
    }
}

impl Device for DieselGenerator {
    fn output_kw(&self, hour: usize) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        self.usage.at_hour(hour) * self.max_power_kw
    }

    /// Fuel burned to hold `output_kw` on the bus for one hour.
    ///
    /// Guarded: a disabled genset or a non-positive fuel figure yields 0
    /// rather than dividing by zero.
    fn fuel_litres(&self, output_kw: f32) -> f32 {
        if !self.enabled || self.fuel_kwh_per_litre <= 0.0 {
            return 0.0;
        }
        let shaft_kw = output_kw / self.grid_efficiency;
        shaft_kw / self.fuel_kwh_per_litre
    }

    fn device_type(&self) -> &'static str {
        "DieselGenerator"
    }

    fn name(&self) -> &str {
        &self.name
    }
}
