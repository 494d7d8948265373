//! Common types and traits for device models.

/// Hours covered by one usage/load block.
pub const BLOCK_HOURS: usize = 4;

/// Number of blocks covering the 48-hour horizon.
pub const NUM_BLOCKS: usize = 12;

/// Trait defining a device that can contribute power to the shared bus.
///
/// This trait provides a common interface for the generation-side devices
/// (generators, motors, solar), allowing the engine to treat their hourly
/// contributions and fuel bookkeeping uniformly. The battery is not a
/// `Device`: it is the one mutable entity and has its own charge/discharge
/// contract.
pub trait Device {
    /// Power contributed to the bus at the given hour, in kW.
    ///
    /// A disabled device contributes 0 for every hour regardless of its
    /// usage schedule.
    fn output_kw(&self, hour: usize) -> f32;

    /// Fuel burned to produce `output_kw` for one hour, in litres.
    ///
    /// Devices without a fuel path return 0.
    fn fuel_litres(&self, output_kw: f32) -> f32;

    /// Returns a human-readable type name for the device.
    fn device_type(&self) -> &'static str;

    /// Returns the configured instance name.
    fn name(&self) -> &str;
}

/// Maps an hour index to the containing four-hour block.
///
/// Block `i` covers hours `4i..4i+3`; the mapping wraps past the horizon so
/// any hour index is valid.
pub fn block_for_hour(hour: usize) -> usize {
    (hour / BLOCK_HOURS) % NUM_BLOCKS
}

/// Per-block usage fractions for one controllable device.
///
/// Twelve values in `[0, 1]`, one per four-hour block of the 48-hour
/// horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageSchedule {
    fractions: [f32; NUM_BLOCKS],
}

impl UsageSchedule {
    /// Creates a schedule from explicit per-block fractions.
    ///
    /// # Panics
    ///
    /// Panics if any fraction is outside `[0, 1]`. Config validation rejects
    /// such values with a field path before construction is attempted.
    pub fn new(fractions: [f32; NUM_BLOCKS]) -> Self {
        for (i, f) in fractions.iter().enumerate() {
            assert!(
                (0.0..=1.0).contains(f),
                "usage fraction for block {i} out of range: {f}"
            );
        }
        Self { fractions }
    }

    /// Creates a schedule holding the same fraction in every block.
    pub fn flat(fraction: f32) -> Self {
        Self::new([fraction; NUM_BLOCKS])
    }

    /// Usage fraction for the block containing `hour`.
    pub fn at_hour(&self, hour: usize) -> f32 {
        self.fractions[block_for_hour(hour)]
    }

    /// The raw per-block fractions.
    pub fn fractions(&self) -> &[f32; NUM_BLOCKS] {
        &self.fractions
    }
}
