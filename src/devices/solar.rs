//! Deck-mounted solar array model.

use crate::devices::types::Device;
use crate::irradiance::{IrradianceProfile, PEAK_IRRADIANCE_KW_M2};

/// A solar array generating from panel area, cell efficiency, and the
/// clear-sky irradiance profile.
///
/// Output is fully deterministic: `area * efficiency * irradiance(hour) *
/// peak irradiance`. The array burns no fuel.
#[derive(Debug, Clone)]
pub struct SolarArray {
    /// Panel area in square metres.
    pub area_m2: f32,

    /// Panel conversion efficiency in kW per square metre of irradiance.
    pub efficiency_kw_per_m2: f32,

    /// Whether the array is connected to the bus.
    pub enabled: bool,

    profile: IrradianceProfile,
}

impl SolarArray {
    /// Creates a new solar array over the given daylight window.
    ///
    /// # Arguments
    ///
    /// * `area_m2` - Panel area (negative values clamp to 0)
    /// * `efficiency_kw_per_m2` - Conversion efficiency (negative clamps to 0)
    /// * `enabled` - Bus connection flag
    /// * `profile` - Daylight window, already validated
    pub fn new(
        area_m2: f32,
        efficiency_kw_per_m2: f32,
        enabled: bool,
        profile: IrradianceProfile,
    ) -> Self {
        Self {
            area_m2: area_m2.max(0.0),
            efficiency_kw_per_m2: efficiency_kw_per_m2.max(0.0),
            enabled,
            profile,
        }
    }

    /// The daylight window driving this array.
    pub fn profile(&self) -> IrradianceProfile {
        self.profile
    }
}

impl Device for SolarArray {
    fn output_kw(&self, hour: usize) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        self.area_m2 * self.efficiency_kw_per_m2 * self.profile.at(hour) * PEAK_IRRADIANCE_KW_M2
    }

    fn fuel_litres(&self, _output_kw: f32) -> f32 {
        0.0
    }

    fn device_type(&self) -> &'static str {
        "SolarArray"
    }

    fn name(&self) -> &str {
        "Solar"
    }
}
