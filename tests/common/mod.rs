//! Shared test fixtures for integration tests.

use vessel_sim::config::{BatteryConfig, GeneratorConfig, ScenarioConfig};

/// Scenario with one 50 kW genset at full usage, a flat 20 kW hotel load,
/// no solar or propulsion, and a 100 kWh battery at half charge with 90%
/// efficiencies.
pub fn generator_surplus_scenario() -> ScenarioConfig {
    let mut cfg = ScenarioConfig::baseline();
    cfg.battery = BatteryConfig {
        capacity_kwh: 100.0,
        min_soc_kwh: 0.0,
        initial_soc_kwh: 50.0,
        charge_efficiency: 0.9,
        discharge_efficiency: 0.9,
    };
    cfg.solar.enabled = false;
    cfg.generators = vec![GeneratorConfig {
        name: "DG1".to_string(),
        max_power_kw: 50.0,
        grid_efficiency: 1.0,
        usage: [1.0; 12],
        ..GeneratorConfig::default()
    }];
    cfg.motors.clear();
    cfg.loads.hotel_kw = [20.0; 12];
    cfg.loads.aux_kw = [0.0; 12];
    cfg.loads.prop_kw = [0.0; 12];
    cfg
}

/// Scenario with every source disabled, a drained battery, and a flat
/// 10 kW hotel load.
pub fn blackout_scenario() -> ScenarioConfig {
    let mut cfg = ScenarioConfig::dead_ship();
    cfg.loads.hotel_kw = [10.0; 12];
    cfg.loads.aux_kw = [0.0; 12];
    cfg.loads.prop_kw = [0.0; 12];
    cfg
}
