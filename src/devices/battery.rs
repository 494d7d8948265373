//! Shipboard battery storage model.

/// A battery energy storage system that can charge and discharge electricity.
///
/// `Battery` models a bank with configurable capacity, round-trip
/// efficiencies, and a reserve floor. It maintains its state of charge (SoC)
/// in kWh and enforces operational bounds on every charge/discharge call.
///
/// The simulation uses one-hour timesteps, so a kW rate over one step equals
/// a kWh amount; both operations take and return per-hour energy figures.
///
/// # Contract
/// - `charge` stores `surplus * charge_efficiency`, capped by free capacity.
/// - `discharge` delivers up to `usable * discharge_efficiency`, drawing
///   `delivered / discharge_efficiency` from the SoC.
/// - SoC never leaves `[0, capacity_kwh]`, and discharge never dips below
///   `min_soc_kwh`.
#[derive(Debug, Clone)]
pub struct Battery {
    /// Total energy capacity in kWh.
    pub capacity_kwh: f32,

    /// Reserve floor in kWh that discharge may not breach.
    pub min_soc_kwh: f32,

    /// Current state of charge in kWh.
    soc_kwh: f32,

    /// Charging efficiency (0..1.0].
    pub charge_efficiency: f32,

    /// Discharging efficiency (0..1.0].
    pub discharge_efficiency: f32,
}

impl Battery {
    /// Creates a new battery with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `capacity_kwh` - Total capacity in kWh (must be > 0)
    /// * `min_soc_kwh` - Reserve floor in kWh (0..=capacity)
    /// * `initial_soc_kwh` - Starting SoC in kWh (0..=capacity)
    /// * `charge_efficiency` - Charge efficiency (0..1.0]
    /// * `discharge_efficiency` - Discharge efficiency (0..1.0]
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero/negative, SoC or reserve out of range, or
    /// efficiencies invalid. Config validation reports the same constraints
    /// with field paths before construction.
    pub fn new(
        capacity_kwh: f32,
        min_soc_kwh: f32,
        initial_soc_kwh: f32,
        charge_efficiency: f32,
        discharge_efficiency: f32,
    ) -> Self {
        assert!(capacity_kwh > 0.0);
        assert!((0.0..=capacity_kwh).contains(&min_soc_kwh));
        assert!((0.0..=capacity_kwh).contains(&initial_soc_kwh));
        assert!(charge_efficiency > 0.0 && charge_efficiency <= 1.0);
        assert!(discharge_efficiency > 0.0 && discharge_efficiency <= 1.0);

        Self {
            capacity_kwh,
            min_soc_kwh,
            soc_kwh: initial_soc_kwh,
            charge_efficiency,
            discharge_efficiency,
        }
    }

    /// Current state of charge in kWh.
    pub fn soc_kwh(&self) -> f32 {
        self.soc_kwh
    }

    /// Energy above the reserve floor that discharge may draw on, in kWh.
    pub fn usable_kwh(&self) -> f32 {
        (self.soc_kwh - self.min_soc_kwh).max(0.0)
    }

    /// Offers surplus energy to the battery and returns the amount stored.
    ///
    /// Stored energy is the offered amount scaled by charge efficiency and
    /// capped by free capacity. Returns 0 for non-positive offers.
    pub fn charge(&mut self, surplus_kw: f32) -> f32 {
        if surplus_kw <= 0.0 {
            return 0.0;
        }
        let free_capacity = self.capacity_kwh - self.soc_kwh;
        let storable = surplus_kw * self.charge_efficiency;
        let stored = storable.min(free_capacity);
        self.soc_kwh = (self.soc_kwh + stored).min(self.capacity_kwh);
        stored
    }

    /// Requests energy from the battery and returns the amount delivered.
    ///
    /// Delivery is capped at the usable energy scaled by discharge
    /// efficiency; the SoC drops by `delivered / discharge_efficiency` to
    /// account for conversion losses. Returns 0 for non-positive requests.
    pub fn discharge(&mut self, needed_kw: f32) -> f32 {
        if needed_kw <= 0.0 {
            return 0.0;
        }
        let max_out = self.usable_kwh() * self.discharge_efficiency;
        let delivered = needed_kw.min(max_out);
        self.soc_kwh = (self.soc_kwh - delivered / self.discharge_efficiency).max(0.0);
        delivered
    }
}
