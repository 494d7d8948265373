//! Main propulsion motor model.

use crate::devices::types::{Device, UsageSchedule};

/// A main propulsion motor contributing to the vessel's electrical bus.
///
/// Shaft power follows the per-block usage schedule scaled by rated power;
/// the contribution to the pooled bus is additionally capped at
/// `max_grid_kw`, since the motor-to-bus converter is usually sized below
/// the shaft rating. Fuel bookkeeping mirrors the genset: divide out the
/// conversion loss, then the kWh-per-litre figure.
#[derive(Debug, Clone)]
pub struct PropulsionMotor {
    name: String,

    /// Rated shaft power in kW.
    pub max_power_kw: f32,

    /// Largest bus contribution the converter supports, in kW.
    pub max_grid_kw: f32,

    /// Motor-to-bus conversion efficiency (0..1.0].
    pub grid_efficiency: f32,

    /// Engine fuel efficiency in kWh per litre.
    pub fuel_kwh_per_litre: f32,

    /// Whether the motor is running this voyage.
    pub enabled: bool,

    usage: UsageSchedule,
}

impl PropulsionMotor {
    /// Creates a new propulsion motor.
    ///
    /// # Panics
    ///
    /// Panics if `max_power_kw` or `max_grid_kw` is negative, or if
    /// `grid_efficiency` is outside `(0, 1]`.
    pub fn new(
        name: impl Into<String>,
        max_power_kw: f32,
        max_grid_kw: f32,
        grid_efficiency: f32,
        fuel_kwh_per_litre: f32,
        enabled: bool,
        usage: UsageSchedule,
    ) -> Self {
        assert!(max_power_kw >= 0.0);
        assert!(max_grid_kw >= 0.0);
        assert!(grid_efficiency > 0.0 && grid_efficiency <= 1.0);

        Self {
            name: name.into(),
            max_power_kw,
            max_grid_kw,
            grid_efficiency,
            fuel_kwh_per_litre,
            enabled,
            usage,
        }
    }

    /// The usage schedule driving this motor.
    pub fn usage(&self) -> &UsageSchedule {
        &self.usage
    }
}

impl Device for PropulsionMotor {
    fn output_kw(&self, hour: usize) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        let shaft_kw = self.usage.at_hour(hour) * self.max_power_kw;
        shaft_kw.min(self.max_grid_kw)
    }

    /// Fuel burned to hold `output_kw` on the bus for one hour.
    ///
    /// Guarded: a disabled motor or a non-positive fuel figure yields 0
    /// rather than dividing by zero.
    fn fuel_litres(&self, output_kw: f32) -> f32 {
        if !self.enabled || self.fuel_kwh_per_litre <= 0.0 {
            return 0.0;
        }
        let shaft_kw = output_kw / self.grid_efficiency;
        shaft_kw / self.fuel_kwh_per_litre
    }

    fn device_type(&self) -> &'static str {
        "PropulsionMotor"
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motor(enabled: bool) -> PropulsionMotor {
        PropulsionMotor::new(
            "M1",
            1000.0,
            1000.0,
            0.95,
            4.5,
            enabled,
            UsageSchedule::flat(0.8),
        )
    }

    #[test]
    fn output_scales_rated_power_by_usage() {
        let m = motor(true);
        for h in 0..48 {
            assert!((m.output_kw(h) - 800.0).abs() < 1e-3);
        }
    }

    #[test]
    fn output_capped_by_converter_rating() {
        let m = PropulsionMotor::new(
            "M1",
            1000.0,
            600.0,
            0.95,
            4.5,
            true,
            UsageSchedule::flat(1.0),
        );
        assert_eq!(m.output_kw(0), 600.0);
    }

    #[test]
    fn disabled_motor_outputs_nothing() {
        let m = motor(false);
        for h in 0..48 {
            assert_eq!(m.output_kw(h), 0.0);
        }
        assert_eq!(m.fuel_litres(800.0), 0.0);
    }

    #[test]
    fn fuel_divides_out_grid_loss() {
        let m = motor(true);
        // 800 kW on the bus at 95% conversion is ~842.1 kW shaft
        let fuel = m.fuel_litres(800.0);
        assert!((fuel - (800.0 / 0.95) / 4.5).abs() < 1e-3);
    }

    #[test]
    fn zero_fuel_figure_is_guarded() {
        let m = PropulsionMotor::new(
            "M1",
            1000.0,
            1000.0,
            0.95,
            0.0,
            true,
            UsageSchedule::flat(1.0),
        );
        assert_eq!(m.fuel_litres(800.0), 0.0);
    }

    #[test]
    #[should_panic]
    fn negative_converter_rating_rejected() {
        PropulsionMotor::new(
            "M1",
            1000.0,
            -1.0,
            0.95,
            4.5,
            true,
            UsageSchedule::flat(0.5),
        );
    }
}
