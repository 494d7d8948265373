//! API response and query types.
//!
//! Scalar field names follow the CSV export schema for consistency across
//! output formats; the JSON records additionally carry the per-device
//! breakdown that drives the detail panel.

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::sim::summary::RunSummary;
use crate::sim::types::{DeviceRecord, HourRecord};

/// Combined state response: scenario echo, summary, and latest hour.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Scenario configuration used for this run.
    pub config: ScenarioConfig,
    /// Aggregate run summary.
    pub summary: RunSummary,
    /// Most recent hour record, absent only for an empty run.
    pub latest_hour: Option<TelemetryRecord>,
}

/// Output and fuel bookkeeping for one device in one hour.
#[derive(Debug, Serialize)]
pub struct DeviceDetail {
    /// Configured device name.
    pub name: String,
    /// Device kind.
    pub device_type: &'static str,
    /// Power contributed to the bus (kW).
    pub output_kw: f32,
    /// Fuel burned (litres).
    pub fuel_litres: f32,
}

impl From<&DeviceRecord> for DeviceDetail {
    fn from(d: &DeviceRecord) -> Self {
        Self {
            name: d.name.clone(),
            device_type: d.device_type,
            output_kw: d.output_kw,
            fuel_litres: d.fuel_litres,
        }
    }
}

/// Single hour record using CSV schema field names plus device breakdown.
#[derive(Debug, Serialize)]
pub struct TelemetryRecord {
    /// Hour index, 0..48.
    pub hour: usize,
    /// Solar generation (kW).
    pub solar_kw: f32,
    /// Combined supply offered to the bus (kW).
    pub supply_kw: f32,
    /// Hotel load served (kW).
    pub hotel_served_kw: f32,
    /// Auxiliary load served (kW).
    pub aux_served_kw: f32,
    /// Propulsion load served (kW).
    pub prop_served_kw: f32,
    /// Demand left unserved (kW).
    pub unmet_kw: f32,
    /// Energy stored into the battery (kWh).
    pub battery_charge_kwh: f32,
    /// Energy delivered by the battery (kWh).
    pub battery_discharge_kwh: f32,
    /// SoC at the start of the hour (kWh).
    pub soc_start_kwh: f32,
    /// SoC at the end of the hour (kWh).
    pub soc_end_kwh: f32,
    /// Surplus the battery could not store (kW).
    pub excess_kw: f32,
    /// Fuel burned across all devices (litres).
    pub total_fuel_litres: f32,
    /// Per-device output and fuel breakdown.
    pub devices: Vec<DeviceDetail>,
}

impl From<&HourRecord> for TelemetryRecord {
    fn from(r: &HourRecord) -> Self {
        Self {
            hour: r.hour,
            solar_kw: r.solar_kw,
            supply_kw: r.supply_kw,
            hotel_served_kw: r.hotel_served_kw,
            aux_served_kw: r.aux_served_kw,
            prop_served_kw: r.prop_served_kw,
            unmet_kw: r.unmet_kw,
            battery_charge_kwh: r.battery_charge_kwh,
            battery_discharge_kwh: r.battery_discharge_kwh,
            soc_start_kwh: r.soc_start_kwh,
            soc_end_kwh: r.soc_end_kwh,
            excess_kw: r.excess_kw,
            total_fuel_litres: r.total_fuel_litres,
            devices: r.devices.iter().map(DeviceDetail::from).collect(),
        }
    }
}

/// Optional range query parameters for the telemetry endpoint.
#[derive(Debug, Deserialize)]
pub struct TelemetryQuery {
    /// Start hour (inclusive).
    pub from: Option<usize>,
    /// End hour (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
