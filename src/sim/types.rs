//! Core simulation types: horizon constants, load schedules, and hour records.

use std::fmt;

use crate::devices::types::{NUM_BLOCKS, block_for_hour};

/// Length of the simulated horizon in hours.
pub const HORIZON_HOURS: usize = 48;

/// Load demand for one hour, split into the three priority tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadDemand {
    /// Hotel (habitability) load in kW. Highest priority.
    pub hotel_kw: f32,
    /// Auxiliary systems load in kW.
    pub aux_kw: f32,
    /// Propulsion load in kW. Lowest priority.
    pub prop_kw: f32,
}

impl LoadDemand {
    /// Combined demand across all tiers in kW.
    pub fn total_kw(&self) -> f32 {
        self.hotel_kw + self.aux_kw + self.prop_kw
    }
}

/// Per-block load schedules for the three tiers over the 48-hour horizon.
///
/// Like device usage, loads are configured per four-hour block; block `i`
/// covers hours `4i..4i+3`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSchedule {
    /// Hotel load per block in kW.
    pub hotel_kw: [f32; NUM_BLOCKS],
    /// Auxiliary load per block in kW.
    pub aux_kw: [f32; NUM_BLOCKS],
    /// Propulsion load per block in kW.
    pub prop_kw: [f32; NUM_BLOCKS],
}

impl LoadSchedule {
    /// Creates a schedule from explicit per-block tier loads.
    ///
    /// # Panics
    ///
    /// Panics if any load is negative. Config validation reports the same
    /// constraint with a field path first.
    pub fn new(
        hotel_kw: [f32; NUM_BLOCKS],
        aux_kw: [f32; NUM_BLOCKS],
        prop_kw: [f32; NUM_BLOCKS],
    ) -> Self {
        for tier in [&hotel_kw, &aux_kw, &prop_kw] {
            for load in tier {
                assert!(*load >= 0.0, "load must be >= 0, got {load}");
            }
        }
        Self {
            hotel_kw,
            aux_kw,
            prop_kw,
        }
    }

    /// Creates a schedule holding the same tier loads in every block.
    pub fn flat(hotel_kw: f32, aux_kw: f32, prop_kw: f32) -> Self {
        Self::new(
            [hotel_kw; NUM_BLOCKS],
            [aux_kw; NUM_BLOCKS],
            [prop_kw; NUM_BLOCKS],
        )
    }

    /// Tier demands for the block containing `hour`.
    pub fn at_hour(&self, hour: usize) -> LoadDemand {
        let block = block_for_hour(hour);
        LoadDemand {
            hotel_kw: self.hotel_kw[block],
            aux_kw: self.aux_kw[block],
            prop_kw: self.prop_kw[block],
        }
    }
}

/// Output and fuel bookkeeping for one device in one hour.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    /// Configured device name.
    pub name: String,
    /// Device kind ("DieselGenerator", "PropulsionMotor", "SolarArray").
    pub device_type: &'static str,
    /// Power contributed to the bus this hour (kW).
    pub output_kw: f32,
    /// Fuel burned this hour (litres).
    pub fuel_litres: f32,
}

/// Complete record of one simulated hour.
///
/// Created once by the dispatch engine, immutable afterwards, and owned by
/// the results aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct HourRecord {
    /// Hour index, 0..48.
    pub hour: usize,
    /// Solar generation this hour (kW).
    pub solar_kw: f32,
    /// Combined generator/motor/solar supply offered to the bus (kW).
    pub supply_kw: f32,
    /// Hotel load served (kW).
    pub hotel_served_kw: f32,
    /// Auxiliary load served (kW).
    pub aux_served_kw: f32,
    /// Propulsion load served (kW).
    pub prop_served_kw: f32,
    /// Demand left unserved after all sources and the battery (kW, >= 0).
    pub unmet_kw: f32,
    /// Energy stored into the battery this hour (kWh, >= 0).
    pub battery_charge_kwh: f32,
    /// Energy delivered by the battery this hour (kWh, >= 0).
    pub battery_discharge_kwh: f32,
    /// Battery SoC at the start of the hour (kWh).
    pub soc_start_kwh: f32,
    /// Battery SoC at the end of the hour (kWh).
    pub soc_end_kwh: f32,
    /// Surplus the saturated battery could not store (kW, >= 0).
    pub excess_kw: f32,
    /// Per-device output and fuel breakdown.
    pub devices: Vec<DeviceRecord>,
    /// Fuel burned across all devices this hour (litres).
    pub total_fuel_litres: f32,
}

impl HourRecord {
    /// Combined load served across all tiers (kW).
    pub fn total_served_kw(&self) -> f32 {
        self.hotel_served_kw + self.aux_served_kw + self.prop_served_kw
    }
}

impl fmt::Display for HourRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>2} | supply={:>7.1} kW (solar={:>5.1}) | served H/A/P={:>6.1}/{:>5.1}/{:>6.1} \
             unmet={:>6.1} | batt chg={:>6.1} dis={:>6.1} SoC={:>7.1} kWh | fuel={:>7.2} L",
            self.hour,
            self.supply_kw,
            self.solar_kw,
            self.hotel_served_kw,
            self.aux_served_kw,
            self.prop_served_kw,
            self.unmet_kw,
            self.battery_charge_kwh,
            self.battery_discharge_kwh,
            self.soc_end_kwh,
            self.total_fuel_litres,
        )
    }
}
