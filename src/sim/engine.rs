//! Dispatch engine that orchestrates devices, loads, and the battery.

use crate::config::{ConfigError, ScenarioConfig};
use crate::devices::{Battery, Device, DieselGenerator, PropulsionMotor, SolarArray};
use crate::irradiance::IrradianceProfile;

use super::results::SimResults;
use super::types::{DeviceRecord, HORIZON_HOURS, HourRecord, LoadSchedule};

/// Serves up to `demand_kw` from the pool, returning the amount served.
fn draw(pool: &mut f32, demand_kw: f32) -> f32 {
    let served = demand_kw.max(0.0).min(*pool);
    *pool -= served;
    served
}

/// Dispatch engine owning all devices, the battery, and the load schedules.
///
/// Holds typed device fields rather than trait objects since the device set
/// is fixed: gensets and motors feed a single pooled bus alongside solar,
/// and the battery balances the residual. One instance simulates one run;
/// each run constructs a fresh engine, so concurrent runs never interfere.
///
/// Timesteps are one hour, so kW rates and per-step kWh amounts coincide.
pub struct Engine {
    battery: Battery,
    solar: SolarArray,
    generators: Vec<DieselGenerator>,
    motors: Vec<PropulsionMotor>,
    loads: LoadSchedule,
}

impl Engine {
    /// Creates a new dispatch engine from already-built components.
    pub fn new(
        battery: Battery,
        solar: SolarArray,
        generators: Vec<DieselGenerator>,
        motors: Vec<PropulsionMotor>,
        loads: LoadSchedule,
    ) -> Self {
        Self {
            battery,
            solar,
            generators,
            motors,
            loads,
        }
    }

    /// Builds an engine with fresh device instances from a scenario.
    ///
    /// The scenario must already have passed [`ScenarioConfig::validate`];
    /// device constructors assert the same invariants as a backstop.
    pub fn from_scenario(config: &ScenarioConfig) -> Self {
        let b = &config.battery;
        let battery = Battery::new(
            b.capacity_kwh,
            b.min_soc_kwh,
            b.initial_soc_kwh,
            b.charge_efficiency,
            b.discharge_efficiency,
        );

        let s = &config.solar;
        let solar = SolarArray::new(
            s.area_m2,
            s.efficiency_kw_per_m2,
            s.enabled,
            IrradianceProfile::new(s.sunrise_hour, s.sunset_hour),
        );

        let generators = config
            .generators
            .iter()
            .map(|g| {
                DieselGenerator::new(
                    g.name.clone(),
                    g.max_power_kw,
                    g.grid_efficiency,
                    g.fuel_kwh_per_litre,
                    g.enabled,
                    crate::devices::UsageSchedule::new(g.usage),
                )
            })
            .collect();

        let motors = config
            .motors
            .iter()
            .map(|m| {
                PropulsionMotor::new(
                    m.name.clone(),
                    m.max_power_kw,
                    m.max_grid_kw.unwrap_or(m.max_power_kw),
                    m.grid_efficiency,
                    m.fuel_kwh_per_litre,
                    m.enabled,
                    crate::devices::UsageSchedule::new(m.usage),
                )
            })
            .collect();

        let l = &config.loads;
        let loads = LoadSchedule::new(l.hotel_kw, l.aux_kw, l.prop_kw);

        Self::new(battery, solar, generators, motors, loads)
    }

    /// Executes one simulated hour and returns its record.
    pub fn step(&mut self, hour: usize) -> HourRecord {
        let demand = self.loads.at_hour(hour);
        let soc_start_kwh = self.battery.soc_kwh();

        // 1. Solar generation for the hour
        let solar_kw = self.solar.output_kw(hour);

        // 2. Generator and motor outputs for the block containing this hour
        let generator_kw: Vec<f32> = self.generators.iter().map(|g| g.output_kw(hour)).collect();
        let motor_kw: Vec<f32> = self.motors.iter().map(|m| m.output_kw(hour)).collect();
        let supply_kw = solar_kw
            + generator_kw.iter().sum::<f32>()
            + motor_kw.iter().sum::<f32>();

        // 3. Allocate pooled supply to loads: Hotel, then Auxiliary, then
        //    Propulsion; leftovers cascade to the next tier
        let mut pool = supply_kw;
        let mut hotel_served_kw = draw(&mut pool, demand.hotel_kw);
        let mut aux_served_kw = draw(&mut pool, demand.aux_kw);
        let mut prop_served_kw = draw(&mut pool, demand.prop_kw);

        let shortfall_kw =
            demand.total_kw() - (hotel_served_kw + aux_served_kw + prop_served_kw);

        let battery_charge_kwh;
        let battery_discharge_kwh;
        let excess_kw;
        let unmet_kw;
        if shortfall_kw > 0.0 {
            // 5. Shortfall drawn from the battery, distributed to the
            //    still-unserved tiers in the same priority order; the
            //    residual is recorded as unmet demand
            let delivered = self.battery.discharge(shortfall_kw);
            let mut remaining = delivered;
            hotel_served_kw += draw(&mut remaining, demand.hotel_kw - hotel_served_kw);
            aux_served_kw += draw(&mut remaining, demand.aux_kw - aux_served_kw);
            prop_served_kw += draw(&mut remaining, demand.prop_kw - prop_served_kw);

            battery_charge_kwh = 0.0;
            battery_discharge_kwh = delivered;
            excess_kw = 0.0;
            unmet_kw = (shortfall_kw - delivered).max(0.0);
        } else {
            // 4. Surplus offered to the battery; whatever it cannot absorb is
            //    excess, never negative unmet demand. Absorption is measured
            //    on the input side: storing `stored` kWh consumes
            //    `stored / charge_efficiency` kW of surplus
            let surplus_kw = pool;
            let stored = self.battery.charge(surplus_kw);
            let absorbed_kw = stored / self.battery.charge_efficiency;

            battery_charge_kwh = stored;
            battery_discharge_kwh = 0.0;
            excess_kw = (surplus_kw - absorbed_kw).max(0.0);
            unmet_kw = 0.0;
        }

        // 6. Fuel per fuel-burning device, each from its own output; solar
        //    and the battery never burn fuel
        let mut devices =
            Vec::with_capacity(self.generators.len() + self.motors.len());
        let mut total_fuel_litres = 0.0;
        for (g, &output_kw) in self.generators.iter().zip(&generator_kw) {
            let fuel_litres = g.fuel_litres(output_kw);
            total_fuel_litres += fuel_litres;
            devices.push(DeviceRecord {
                name: g.name().to_string(),
                device_type: g.device_type(),
                output_kw,
                fuel_litres,
            });
        }
        for (m, &output_kw) in self.motors.iter().zip(&motor_kw) {
            let fuel_litres = m.fuel_litres(output_kw);
            total_fuel_litres += fuel_litres;
            devices.push(DeviceRecord {
                name: m.name().to_string(),
                device_type: m.device_type(),
                output_kw,
                fuel_litres,
            });
        }

        // 7. Emit the hour record
        HourRecord {
            hour,
            solar_kw,
            supply_kw,
            hotel_served_kw,
            aux_served_kw,
            prop_served_kw,
            unmet_kw,
            battery_charge_kwh,
            battery_discharge_kwh,
            soc_start_kwh,
            soc_end_kwh: self.battery.soc_kwh(),
            excess_kw,
            devices,
            total_fuel_litres,
        }
    }

    /// Executes all 48 hours and returns the complete results table.
    pub fn run(&mut self) -> SimResults {
        let mut results = SimResults::with_capacity(HORIZON_HOURS);
        for hour in 0..HORIZON_HOURS {
            results.append(self.step(hour));
        }
        results
    }

    /// Returns a reference to the battery (for SoC and capacity queries).
    pub fn battery(&self) -> &Battery {
        &self.battery
    }
}

/// Validates a scenario, builds a fresh engine, and runs the full horizon.
///
/// # Errors
///
/// Returns the full list of configuration errors if validation fails; the
/// simulation does not run on an invalid scenario.
pub fn run_scenario(config: &ScenarioConfig) -> Result<SimResults, Vec<ConfigError>> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(Engine::from_scenario(config).run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::UsageSchedule;

    fn no_solar() -> SolarArray {
        SolarArray::new(0.0, 0.0, false, IrradianceProfile::new(6, 18))
    }

    fn single_genset(max_power_kw: f32, fraction: f32) -> Vec<DieselGenerator> {
        vec![DieselGenerator::new(
            "DG1",
            max_power_kw,
            1.0,
            4.5,
            true,
            UsageSchedule::flat(fraction),
        )]
    }

    #[test]
    fn pool_serves_tiers_in_priority_order() {
        // 100 kW supply against 60/30/50 demand: propulsion is shorted first
        let mut engine = Engine::new(
            Battery::new(10.0, 0.0, 0.0, 1.0, 1.0),
            no_solar(),
            single_genset(100.0, 1.0),
            Vec::new(),
            LoadSchedule::flat(60.0, 30.0, 50.0),
        );
        let record = engine.step(0);
        assert_eq!(record.hotel_served_kw, 60.0);
        assert_eq!(record.aux_served_kw, 30.0);
        assert!((record.prop_served_kw - 10.0).abs() < 1e-4);
        assert!((record.unmet_kw - 40.0).abs() < 1e-4);
    }

    #[test]
    fn battery_covers_shortfall_before_unmet() {
        let mut engine = Engine::new(
            Battery::new(100.0, 0.0, 100.0, 1.0, 1.0),
            no_solar(),
            Vec::new(),
            Vec::new(),
            LoadSchedule::flat(20.0, 0.0, 0.0),
        );
        let record = engine.step(0);
        assert_eq!(record.hotel_served_kw, 20.0);
        assert_eq!(record.unmet_kw, 0.0);
        assert_eq!(record.battery_discharge_kwh, 20.0);
        assert_eq!(record.soc_end_kwh, 80.0);
    }

    #[test]
    fn surplus_charges_battery() {
        // 50 kW genset against 20 kW hotel: 30 kW surplus stores 27 kWh at 90%
        let mut engine = Engine::new(
            Battery::new(100.0, 0.0, 50.0, 0.9, 0.9),
            no_solar(),
            single_genset(50.0, 1.0),
            Vec::new(),
            LoadSchedule::flat(20.0, 0.0, 0.0),
        );
        let record = engine.step(0);
        assert_eq!(record.unmet_kw, 0.0);
        assert!((record.battery_charge_kwh - 27.0).abs() < 1e-4);
        assert!((record.soc_end_kwh - 77.0).abs() < 1e-4);
        assert_eq!(record.excess_kw, 0.0);
    }

    #[test]
    fn saturated_battery_turns_surplus_into_excess() {
        let mut engine = Engine::new(
            Battery::new(100.0, 0.0, 100.0, 0.9, 0.9),
            no_solar(),
            single_genset(50.0, 1.0),
            Vec::new(),
            LoadSchedule::flat(20.0, 0.0, 0.0),
        );
        let record = engine.step(0);
        assert_eq!(record.battery_charge_kwh, 0.0);
        assert!((record.excess_kw - 30.0).abs() < 1e-4);
        assert_eq!(record.unmet_kw, 0.0);
    }

    #[test]
    fn fuel_tracked_per_device() {
        let generators = vec![
            DieselGenerator::new("DG1", 100.0, 1.0, 4.0, true, UsageSchedule::flat(1.0)),
            DieselGenerator::new("DG2", 100.0, 1.0, 4.0, false, UsageSchedule::flat(1.0)),
        ];
        let mut engine = Engine::new(
            Battery::new(10.0, 0.0, 5.0, 1.0, 1.0),
            no_solar(),
            generators,
            Vec::new(),
            LoadSchedule::flat(50.0, 0.0, 0.0),
        );
        let record = engine.step(0);
        assert_eq!(record.devices.len(), 2);
        assert!((record.devices[0].fuel_litres - 25.0).abs() < 1e-4);
        assert_eq!(record.devices[1].output_kw, 0.0);
        assert_eq!(record.devices[1].fuel_litres, 0.0);
        assert!((record.total_fuel_litres - 25.0).abs() < 1e-4);
    }

    #[test]
    fn run_covers_full_horizon_in_order() {
        let mut engine = Engine::new(
            Battery::new(10.0, 0.0, 5.0, 1.0, 1.0),
            no_solar(),
            single_genset(10.0, 0.5),
            Vec::new(),
            LoadSchedule::flat(5.0, 0.0, 0.0),
        );
        let results = engine.run();
        assert_eq!(results.len(), HORIZON_HOURS);
        for (i, r) in results.all().iter().enumerate() {
            assert_eq!(r.hour, i);
        }
    }

    #[test]
    fn soc_snapshots_chain_between_hours() {
        let mut engine = Engine::new(
            Battery::new(100.0, 0.0, 50.0, 1.0, 1.0),
            no_solar(),
            Vec::new(),
            Vec::new(),
            LoadSchedule::flat(5.0, 0.0, 0.0),
        );
        let results = engine.run();
        for pair in results.all().windows(2) {
            assert_eq!(pair[0].soc_end_kwh, pair[1].soc_start_kwh);
        }
    }

    #[test]
    fn run_scenario_rejects_invalid_config() {
        let mut config = ScenarioConfig::baseline();
        config.battery.capacity_kwh = 0.0;
        let result = run_scenario(&config);
        assert!(result.is_err());
    }
}
