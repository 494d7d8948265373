//! Integration tests for the dispatch engine's end-to-end properties.

mod common;

use vessel_sim::config::ScenarioConfig;
use vessel_sim::sim::run_scenario;
use vessel_sim::sim::types::HORIZON_HOURS;

#[test]
fn soc_stays_within_bounds_for_all_hours() {
    let config = ScenarioConfig::baseline();
    let results = run_scenario(&config).expect("baseline must be valid");

    let capacity = config.battery.capacity_kwh;
    for r in results.all() {
        assert!(
            r.soc_end_kwh >= 0.0 && r.soc_end_kwh <= capacity,
            "hour {}: SoC {} outside [0, {capacity}]",
            r.hour,
            r.soc_end_kwh
        );
    }
}

#[test]
fn total_fuel_equals_sum_of_hourly_totals() {
    let results = run_scenario(&ScenarioConfig::baseline()).expect("baseline must be valid");

    let per_hour_sum: f32 = results.all().iter().map(|r| r.total_fuel_litres).sum();
    assert!((results.total_fuel_litres() - per_hour_sum).abs() < 1e-3);
}

#[test]
fn per_hour_fuel_equals_sum_of_device_fuel() {
    let results = run_scenario(&ScenarioConfig::baseline()).expect("baseline must be valid");

    for r in results.all() {
        let device_sum: f32 = r.devices.iter().map(|d| d.fuel_litres).sum();
        assert!(
            (r.total_fuel_litres - device_sum).abs() < 1e-3,
            "hour {}: total {} != device sum {}",
            r.hour,
            r.total_fuel_litres,
            device_sum
        );
    }
}

#[test]
fn disabled_device_never_outputs_or_burns_fuel() {
    let mut config = ScenarioConfig::baseline();
    config.generators[1].enabled = false;
    config.generators[1].usage = [1.0; 12];
    let results = run_scenario(&config).expect("config must be valid");

    for r in results.all() {
        let dg2 = r
            .devices
            .iter()
            .find(|d| d.name == "DG2")
            .expect("DG2 should be recorded");
        assert_eq!(dg2.output_kw, 0.0, "hour {}", r.hour);
        assert_eq!(dg2.fuel_litres, 0.0, "hour {}", r.hour);
    }
}

#[test]
fn generator_surplus_charges_battery_until_saturation() {
    let config = common::generator_surplus_scenario();
    let results = run_scenario(&config).expect("config must be valid");

    // Hotel load is covered by the genset every hour
    for r in results.all() {
        assert_eq!(r.hotel_served_kw, 20.0, "hour {}", r.hour);
        assert_eq!(r.unmet_kw, 0.0, "hour {}", r.hour);
        assert_eq!(r.battery_discharge_kwh, 0.0, "hour {}", r.hour);
    }

    // 30 kW surplus stores 27 kWh effective: 50 -> 77 -> 100, then excess
    let records = results.all();
    assert!((records[0].battery_charge_kwh - 27.0).abs() < 1e-3);
    assert!((records[0].soc_end_kwh - 77.0).abs() < 1e-3);
    assert!((records[1].battery_charge_kwh - 23.0).abs() < 1e-3);
    assert!((records[1].soc_end_kwh - 100.0).abs() < 1e-3);
    for r in &records[2..] {
        assert_eq!(r.battery_charge_kwh, 0.0, "hour {}", r.hour);
        assert!((r.soc_end_kwh - 100.0).abs() < 1e-3, "hour {}", r.hour);
        assert!((r.excess_kw - 30.0).abs() < 1e-3, "hour {}", r.hour);
    }
}

#[test]
fn blackout_records_unmet_demand_every_hour() {
    let config = common::blackout_scenario();
    let results = run_scenario(&config).expect("config must be valid");

    assert_eq!(results.len(), HORIZON_HOURS);
    for r in results.all() {
        assert_eq!(r.supply_kw, 0.0, "hour {}", r.hour);
        assert_eq!(r.unmet_kw, 10.0, "hour {}", r.hour);
        assert_eq!(r.battery_discharge_kwh, 0.0, "hour {}", r.hour);
        assert_eq!(r.soc_end_kwh, 0.0, "hour {}", r.hour);
        assert_eq!(r.total_fuel_litres, 0.0, "hour {}", r.hour);
    }
}

#[test]
fn identical_configs_produce_identical_runs() {
    let config = ScenarioConfig::baseline();
    let first = run_scenario(&config).expect("baseline must be valid");
    let second = run_scenario(&config).expect("baseline must be valid");
    assert_eq!(first, second);
}

#[test]
fn records_cover_the_horizon_in_order() {
    let results = run_scenario(&ScenarioConfig::baseline()).expect("baseline must be valid");
    assert_eq!(results.len(), HORIZON_HOURS);
    for (i, r) in results.all().iter().enumerate() {
        assert_eq!(r.hour, i);
    }
    assert!(results.lookup(0).is_ok());
    assert!(results.lookup(47).is_ok());
    assert!(results.lookup(48).is_err());
}

#[test]
fn invalid_usage_fraction_prevents_the_run() {
    let mut config = ScenarioConfig::baseline();
    config.motors[0].usage[6] = 1.5;
    let result = run_scenario(&config);

    let errors = result.expect_err("out-of-range usage must be rejected");
    assert!(errors.iter().any(|e| e.field == "motor[0].usage[6]"));
}

#[test]
fn unmet_demand_is_never_negative() {
    for preset in ScenarioConfig::PRESETS {
        let config = ScenarioConfig::from_preset(preset).expect("preset must load");
        let results = run_scenario(&config).expect("preset must be valid");
        for r in results.all() {
            assert!(r.unmet_kw >= 0.0, "{preset} hour {}: {}", r.hour, r.unmet_kw);
            assert!(r.excess_kw >= 0.0, "{preset} hour {}: {}", r.hour, r.excess_kw);
        }
    }
}

#[test]
fn solar_profile_repeats_on_the_second_day() {
    let mut config = ScenarioConfig::baseline();
    // Freeze everything but solar so the record isolates the profile
    for g in &mut config.generators {
        g.enabled = false;
    }
    for m in &mut config.motors {
        m.enabled = false;
    }
    config.loads.hotel_kw = [0.0; 12];
    config.loads.aux_kw = [0.0; 12];
    config.loads.prop_kw = [0.0; 12];

    let results = run_scenario(&config).expect("config must be valid");
    let records = results.all();
    for h in 0..24 {
        assert_eq!(
            records[h].solar_kw,
            records[h + 24].solar_kw,
            "hour {h} should match hour {}",
            h + 24
        );
    }
}
