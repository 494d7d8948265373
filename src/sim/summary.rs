//! Post-hoc summary metrics from simulation results.

use std::fmt;

use serde::Serialize;

use super::types::HourRecord;

/// Aggregate metrics derived from a complete simulation run.
///
/// Computed post-hoc from the recorded hours to ensure consistency between
/// the per-hour table and the reported figures. Timesteps are one hour, so
/// summing kW readings yields kWh directly.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Fuel burned over the horizon (litres).
    pub total_fuel_litres: f32,
    /// Solar energy generated over the horizon (kWh).
    pub total_solar_kwh: f32,
    /// Demand left unserved over the horizon (kWh).
    pub total_unmet_kwh: f32,
    /// Number of hours with any unmet demand.
    pub hours_with_unmet: usize,
    /// Largest single-hour unmet demand (kW).
    pub peak_unmet_kw: f32,
    /// Surplus the battery could not absorb (kWh).
    pub total_excess_kwh: f32,
    /// Lowest end-of-hour SoC seen (kWh).
    pub min_soc_kwh: f32,
    /// Highest end-of-hour SoC seen (kWh).
    pub max_soc_kwh: f32,
    /// Total battery energy throughput (kWh, charge + discharge).
    pub battery_throughput_kwh: f32,
    /// Battery equivalent full cycles (throughput / 2 * capacity).
    pub battery_equivalent_full_cycles: f32,
}

impl RunSummary {
    /// Computes all metrics from the complete record slice.
    ///
    /// # Arguments
    ///
    /// * `records` - Complete per-hour results
    /// * `battery_capacity_kwh` - Battery capacity for cycle calculation
    pub fn from_records(records: &[HourRecord], battery_capacity_kwh: f32) -> Self {
        if records.is_empty() {
            return Self {
                total_fuel_litres: 0.0,
                total_solar_kwh: 0.0,
                total_unmet_kwh: 0.0,
                hours_with_unmet: 0,
                peak_unmet_kw: 0.0,
                total_excess_kwh: 0.0,
                min_soc_kwh: 0.0,
                max_soc_kwh: 0.0,
                battery_throughput_kwh: 0.0,
                battery_equivalent_full_cycles: 0.0,
            };
        }

        let mut total_fuel = 0.0_f32;
        let mut total_solar = 0.0_f32;
        let mut total_unmet = 0.0_f32;
        let mut hours_with_unmet = 0_usize;
        let mut peak_unmet = 0.0_f32;
        let mut total_excess = 0.0_f32;
        let mut min_soc = f32::INFINITY;
        let mut max_soc = f32::NEG_INFINITY;
        let mut throughput = 0.0_f32;

        for r in records {
            total_fuel += r.total_fuel_litres;
            total_solar += r.solar_kw;
            total_unmet += r.unmet_kw;
            if r.unmet_kw > 0.0 {
                hours_with_unmet += 1;
            }
            peak_unmet = peak_unmet.max(r.unmet_kw);
            total_excess += r.excess_kw;
            min_soc = min_soc.min(r.soc_end_kwh);
            max_soc = max_soc.max(r.soc_end_kwh);
            throughput += r.battery_charge_kwh + r.battery_discharge_kwh;
        }

        let cycles = if battery_capacity_kwh > 0.0 {
            throughput / (2.0 * battery_capacity_kwh)
        } else {
            0.0
        };

        Self {
            total_fuel_litres: total_fuel,
            total_solar_kwh: total_solar,
            total_unmet_kwh: total_unmet,
            hours_with_unmet,
            peak_unmet_kw: peak_unmet,
            total_excess_kwh: total_excess,
            min_soc_kwh: min_soc,
            max_soc_kwh: max_soc,
            battery_throughput_kwh: throughput,
            battery_equivalent_full_cycles: cycles,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(f, "Total fuel:          {:.2} L", self.total_fuel_litres)?;
        writeln!(f, "Solar energy:        {:.1} kWh", self.total_solar_kwh)?;
        writeln!(
            f,
            "Unmet demand:        {:.1} kWh over {} h (peak {:.1} kW)",
            self.total_unmet_kwh, self.hours_with_unmet, self.peak_unmet_kw
        )?;
        writeln!(f, "Wasted surplus:      {:.1} kWh", self.total_excess_kwh)?;
        writeln!(
            f,
            "Battery SoC range:   {:.1} – {:.1} kWh",
            self.min_soc_kwh, self.max_soc_kwh
        )?;
        write!(
            f,
            "Battery throughput:  {:.1} kWh ({:.2} equiv. cycles)",
            self.battery_throughput_kwh, self.battery_equivalent_full_cycles
        )
    }
}
