//! CSV export for simulation hour records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::HourRecord;

/// Column header for CSV telemetry export.
const HEADER: &str = "hour,solar_kw,supply_kw,hotel_served_kw,aux_served_kw,\
                      prop_served_kw,unmet_kw,battery_charge_kwh,battery_discharge_kwh,\
                      soc_start_kwh,soc_end_kwh,excess_kw,total_fuel_litres";

/// Exports hour records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per hour. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[HourRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes hour records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[HourRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in records {
        wtr.write_record(&[
            r.hour.to_string(),
            format!("{:.4}", r.solar_kw),
            format!("{:.4}", r.supply_kw),
            format!("{:.4}", r.hotel_served_kw),
            format!("{:.4}", r.aux_served_kw),
            format!("{:.4}", r.prop_served_kw),
            format!("{:.4}", r.unmet_kw),
            format!("{:.4}", r.battery_charge_kwh),
            format!("{:.4}", r.battery_discharge_kwh),
            format!("{:.4}", r.soc_start_kwh),
            format!("{:.4}", r.soc_end_kwh),
            format!("{:.4}", r.excess_kw),
            format!("{:.4}", r.total_fuel_litres),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
