//! TOML-based scenario configuration and preset definitions.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::devices::types::NUM_BLOCKS;

/// Default usage pattern: off in port, 80% through the working blocks.
const DEFAULT_USAGE: [f32; NUM_BLOCKS] = [
    0.0, 0.0, 0.0, 0.0, 0.8, 0.8, 0.0, 0.8, 0.8, 0.8, 0.8, 0.0,
];

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline vessel. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Battery bank parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Solar array parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Diesel generator sets.
    #[serde(default = "default_generators", rename = "generator")]
    pub generators: Vec<GeneratorConfig>,
    /// Main propulsion motors.
    #[serde(default = "default_motors", rename = "motor")]
    pub motors: Vec<MotorConfig>,
    /// Per-block load schedules for the three priority tiers.
    #[serde(default)]
    pub loads: LoadsConfig,
}

/// Battery bank parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (kWh, must be > 0).
    pub capacity_kwh: f32,
    /// Reserve floor discharge may not breach (kWh).
    pub min_soc_kwh: f32,
    /// Starting state of charge (kWh).
    pub initial_soc_kwh: f32,
    /// Charge efficiency (0..1.0].
    pub charge_efficiency: f32,
    /// Discharge efficiency (0..1.0].
    pub discharge_efficiency: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 5000.0,
            min_soc_kwh: 500.0,
            initial_soc_kwh: 4500.0,
            charge_efficiency: 1.0,
            discharge_efficiency: 1.0,
        }
    }
}

/// Solar array parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Panel area (m²).
    pub area_m2: f32,
    /// Panel conversion efficiency (kW per m² of irradiance).
    pub efficiency_kw_per_m2: f32,
    /// Hour of sunrise (inclusive, must be < sunset_hour).
    pub sunrise_hour: usize,
    /// Hour of sunset (exclusive, at most 24).
    pub sunset_hour: usize,
    /// Whether the array is connected to the bus.
    pub enabled: bool,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            area_m2: 100.0,
            efficiency_kw_per_m2: 0.2,
            sunrise_hour: 6,
            sunset_hour: 18,
            enabled: true,
        }
    }
}

/// One diesel generator set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Unique device name.
    pub name: String,
    /// Rated power (kW).
    pub max_power_kw: f32,
    /// Engine fuel efficiency (kWh per litre, must be > 0 when enabled).
    pub fuel_kwh_per_litre: f32,
    /// Genset-to-bus conversion efficiency (0..1.0].
    pub grid_efficiency: f32,
    /// Whether the genset runs this voyage.
    pub enabled: bool,
    /// Per-block usage fractions, each in [0, 1].
    pub usage: [f32; NUM_BLOCKS],
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            max_power_kw: 250.0,
            fuel_kwh_per_litre: 4.5,
            grid_efficiency: 0.95,
            enabled: true,
            usage: DEFAULT_USAGE,
        }
    }
}

/// One main propulsion motor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotorConfig {
    /// Unique device name.
    pub name: String,
    /// Rated shaft power (kW).
    pub max_power_kw: f32,
    /// Largest bus contribution the converter supports (kW); defaults to
    /// the shaft rating when omitted.
    pub max_grid_kw: Option<f32>,
    /// Engine fuel efficiency (kWh per litre, must be > 0 when enabled).
    pub fuel_kwh_per_litre: f32,
    /// Motor-to-bus conversion efficiency (0..1.0].
    pub grid_efficiency: f32,
    /// Whether the motor runs this voyage.
    pub enabled: bool,
    /// Per-block usage fractions, each in [0, 1].
    pub usage: [f32; NUM_BLOCKS],
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            max_power_kw: 1000.0,
            max_grid_kw: None,
            fuel_kwh_per_litre: 4.5,
            grid_efficiency: 0.95,
            enabled: true,
            usage: DEFAULT_USAGE,
        }
    }
}

/// Per-block load schedules for the three priority tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadsConfig {
    /// Hotel load per block (kW).
    pub hotel_kw: [f32; NUM_BLOCKS],
    /// Auxiliary load per block (kW).
    pub aux_kw: [f32; NUM_BLOCKS],
    /// Propulsion load per block (kW).
    pub prop_kw: [f32; NUM_BLOCKS],
}

impl Default for LoadsConfig {
    fn default() -> Self {
        Self {
            hotel_kw: [190.0; NUM_BLOCKS],
            aux_kw: [30.0; NUM_BLOCKS],
            prop_kw: [900.0; NUM_BLOCKS],
        }
    }
}

fn default_generators() -> Vec<GeneratorConfig> {
    vec![
        GeneratorConfig {
            name: "DG1".to_string(),
            ..GeneratorConfig::default()
        },
        GeneratorConfig {
            name: "DG2".to_string(),
            ..GeneratorConfig::default()
        },
    ]
}

fn default_motors() -> Vec<MotorConfig> {
    vec![
        MotorConfig {
            name: "M1".to_string(),
            ..MotorConfig::default()
        },
        MotorConfig {
            name: "M2".to_string(),
            ..MotorConfig::default()
        },
    ]
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: two motors, two gensets, solar, and a
    /// half-day transit usage pattern.
    pub fn baseline() -> Self {
        Self {
            battery: BatteryConfig::default(),
            solar: SolarConfig::default(),
            generators: default_generators(),
            motors: default_motors(),
            loads: LoadsConfig::default(),
        }
    }

    /// Returns the harbor-stay preset: motors shut down, no propulsion
    /// load, one genset carrying hotel and auxiliary loads.
    pub fn harbor_stay() -> Self {
        Self {
            battery: BatteryConfig {
                initial_soc_kwh: 2500.0,
                ..BatteryConfig::default()
            },
            solar: SolarConfig::default(),
            generators: vec![
                GeneratorConfig {
                    name: "DG1".to_string(),
                    usage: [0.8; NUM_BLOCKS],
                    ..GeneratorConfig::default()
                },
                GeneratorConfig {
                    name: "DG2".to_string(),
                    enabled: false,
                    ..GeneratorConfig::default()
                },
            ],
            motors: default_motors()
                .into_iter()
                .map(|m| MotorConfig {
                    enabled: false,
                    ..m
                })
                .collect(),
            loads: LoadsConfig {
                prop_kw: [0.0; NUM_BLOCKS],
                ..LoadsConfig::default()
            },
        }
    }

    /// Returns the dead-ship preset: every source disabled and the battery
    /// drained, leaving all demand unmet.
    pub fn dead_ship() -> Self {
        Self {
            battery: BatteryConfig {
                min_soc_kwh: 0.0,
                initial_soc_kwh: 0.0,
                ..BatteryConfig::default()
            },
            solar: SolarConfig {
                enabled: false,
                ..SolarConfig::default()
            },
            generators: default_generators()
                .into_iter()
                .map(|g| GeneratorConfig {
                    enabled: false,
                    ..g
                })
                .collect(),
            motors: default_motors()
                .into_iter()
                .map(|m| MotorConfig {
                    enabled: false,
                    ..m
                })
                .collect(),
            loads: LoadsConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "harbor_stay", "dead_ship"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "harbor_stay" => Ok(Self::harbor_stay()),
            "dead_ship" => Ok(Self::dead_ship()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid. Simulation
    /// must not start while any error is present; out-of-range values are
    /// rejected here rather than clamped so operator input mistakes surface
    /// immediately.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let b = &self.battery;
        if b.capacity_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "battery.capacity_kwh".into(),
                message: "must be > 0".into(),
            });
        } else {
            if !(0.0..=b.capacity_kwh).contains(&b.min_soc_kwh) {
                errors.push(ConfigError {
                    field: "battery.min_soc_kwh".into(),
                    message: "must be in [0, capacity_kwh]".into(),
                });
            }
            if !(0.0..=b.capacity_kwh).contains(&b.initial_soc_kwh) {
                errors.push(ConfigError {
                    field: "battery.initial_soc_kwh".into(),
                    message: "must be in [0, capacity_kwh]".into(),
                });
            }
        }
        if !(b.charge_efficiency > 0.0 && b.charge_efficiency <= 1.0) {
            errors.push(ConfigError {
                field: "battery.charge_efficiency".into(),
                message: "must be in (0, 1]".into(),
            });
        }
        if !(b.discharge_efficiency > 0.0 && b.discharge_efficiency <= 1.0) {
            errors.push(ConfigError {
                field: "battery.discharge_efficiency".into(),
                message: "must be in (0, 1]".into(),
            });
        }

        let s = &self.solar;
        if s.sunrise_hour >= s.sunset_hour {
            errors.push(ConfigError {
                field: "solar.sunrise_hour".into(),
                message: "must be < solar.sunset_hour".into(),
            });
        }
        if s.sunset_hour > 24 {
            errors.push(ConfigError {
                field: "solar.sunset_hour".into(),
                message: "must be <= 24".into(),
            });
        }
        if s.area_m2 < 0.0 {
            errors.push(ConfigError {
                field: "solar.area_m2".into(),
                message: "must be >= 0".into(),
            });
        }
        if s.efficiency_kw_per_m2 < 0.0 {
            errors.push(ConfigError {
                field: "solar.efficiency_kw_per_m2".into(),
                message: "must be >= 0".into(),
            });
        }

        let mut names = HashSet::new();
        for (i, g) in self.generators.iter().enumerate() {
            Self::validate_device(
                &mut errors,
                &mut names,
                &format!("generator[{i}]"),
                &g.name,
                g.max_power_kw,
                g.fuel_kwh_per_litre,
                g.grid_efficiency,
                g.enabled,
                &g.usage,
            );
        }
        for (i, m) in self.motors.iter().enumerate() {
            let path = format!("motor[{i}]");
            Self::validate_device(
                &mut errors,
                &mut names,
                &path,
                &m.name,
                m.max_power_kw,
                m.fuel_kwh_per_litre,
                m.grid_efficiency,
                m.enabled,
                &m.usage,
            );
            if let Some(cap) = m.max_grid_kw
                && cap < 0.0
            {
                errors.push(ConfigError {
                    field: format!("{path}.max_grid_kw"),
                    message: "must be >= 0".into(),
                });
            }
        }

        let l = &self.loads;
        for (tier, blocks) in [
            ("hotel_kw", &l.hotel_kw),
            ("aux_kw", &l.aux_kw),
            ("prop_kw", &l.prop_kw),
        ] {
            for (i, load) in blocks.iter().enumerate() {
                if *load < 0.0 {
                    errors.push(ConfigError {
                        field: format!("loads.{tier}[{i}]"),
                        message: "must be >= 0".into(),
                    });
                }
            }
        }

        errors
    }

    #[expect(clippy::too_many_arguments)]
    fn validate_device(
        errors: &mut Vec<ConfigError>,
        names: &mut HashSet<String>,
        path: &str,
        name: &str,
        max_power_kw: f32,
        fuel_kwh_per_litre: f32,
        grid_efficiency: f32,
        enabled: bool,
        usage: &[f32; NUM_BLOCKS],
    ) {
        if name.is_empty() {
            errors.push(ConfigError {
                field: format!("{path}.name"),
                message: "must not be empty".into(),
            });
        } else if !names.insert(name.to_string()) {
            errors.push(ConfigError {
                field: format!("{path}.name"),
                message: format!("duplicate device name \"{name}\""),
            });
        }
        if max_power_kw < 0.0 {
            errors.push(ConfigError {
                field: format!("{path}.max_power_kw"),
                message: "must be >= 0".into(),
            });
        }
        if enabled && fuel_kwh_per_litre <= 0.0 {
            errors.push(ConfigError {
                field: format!("{path}.fuel_kwh_per_litre"),
                message: "must be > 0 for an enabled device".into(),
            });
        }
        if !(grid_efficiency > 0.0 && grid_efficiency <= 1.0) {
            errors.push(ConfigError {
                field: format!("{path}.grid_efficiency"),
                message: "must be in (0, 1]".into(),
            });
        }
        for (i, f) in usage.iter().enumerate() {
            if !(0.0..=1.0).contains(f) {
                errors.push(ConfigError {
                    field: format!("{path}.usage[{i}]"),
                    message: "must be in [0, 1]".into(),
                });
            }
        }
    }
}
