//! FFI-exposed simulation configuration.

use wildfire_ca_core::{ConfigError, SimulationConfig, WaterProximity, WindDirection};

/// C-compatible mirror of the core `SimulationConfig`.
///
/// Obtain defaults with `wildfire_config_default()` and override individual fields.
///
/// `wind` uses the index order: 0 = South East, 1 = East, 2 = North East, 3 = North,
/// 4 = North West, 5 = West, 6 = South West, 7 = South, 8 = no wind.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WildfireConfig {
    /// Probability that `Empty`/`DeadTree` becomes `Sapling` each tick.
    pub growth_probability: f64,
    /// Probability that `Sapling` becomes `Tree` each tick.
    pub sapling_maturation_probability: f64,
    /// Probability that `Tree` becomes `OldTree` each tick.
    pub tree_aging_probability: f64,
    /// Probability that `OldTree` becomes `DeadTree` each tick.
    pub old_tree_death_probability: f64,
    /// Probability of a lightning strike per lightning draw.
    pub lightning_probability: f64,
    /// Spread multiplier next to water (1 = no effect, 0 = no spread).
    pub water_dampening: f64,
    /// Probability of skipping a diagonal neighbor during the ignition scan.
    pub diagonal_skip_probability: f64,
    /// Wind direction index (0-8).
    pub wind: u8,
    /// One lightning draw per non-igniting neighbor (`true`) or per cell (`false`).
    pub lightning_per_neighbor: bool,
    /// Near-water test reads the previous generation instead of the grid under construction.
    pub water_from_previous_generation: bool,
}

impl From<&SimulationConfig> for WildfireConfig {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            growth_probability: config.growth_probability,
            sapling_maturation_probability: config.sapling_maturation_probability,
            tree_aging_probability: config.tree_aging_probability,
            old_tree_death_probability: config.old_tree_death_probability,
            lightning_probability: config.lightning_probability,
            water_dampening: config.water_dampening,
            diagonal_skip_probability: config.diagonal_skip_probability,
            wind: config.wind as u8,
            lightning_per_neighbor: config.lightning_per_neighbor,
            water_from_previous_generation: config.water_proximity
                == WaterProximity::PreviousGeneration,
        }
    }
}

impl WildfireConfig {
    /// Convert to the core configuration and validate it.
    pub(crate) fn to_core(self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig {
            growth_probability: self.growth_probability,
            sapling_maturation_probability: self.sapling_maturation_probability,
            tree_aging_probability: self.tree_aging_probability,
            old_tree_death_probability: self.old_tree_death_probability,
            lightning_probability: self.lightning_probability,
            water_dampening: self.water_dampening,
            wind: WindDirection::try_from(self.wind)?,
            diagonal_skip_probability: self.diagonal_skip_probability,
            lightning_per_neighbor: self.lightning_per_neighbor,
            water_proximity: if self.water_from_previous_generation {
                WaterProximity::PreviousGeneration
            } else {
                WaterProximity::NextGeneration
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Default configuration: growth 0.05, lightning 0.0001, old-tree death 0.01,
/// instant maturation and aging, no water dampening, no wind.
#[no_mangle]
pub extern "C" fn wildfire_config_default() -> WildfireConfig {
    WildfireConfig::from(&SimulationConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips() {
        let ffi = wildfire_config_default();
        assert_eq!(ffi.wind, 8);
        assert_eq!(ffi.to_core(), Ok(SimulationConfig::default()));
    }

    #[test]
    fn test_invalid_wind_rejected() {
        let ffi = WildfireConfig {
            wind: 12,
            ..wildfire_config_default()
        };
        assert_eq!(
            ffi.to_core(),
            Err(ConfigError::UnknownWindDirection("12".to_string()))
        );
    }

    #[test]
    fn test_previous_generation_flag() {
        let ffi = WildfireConfig {
            water_from_previous_generation: true,
            wind: 3,
            ..wildfire_config_default()
        };
        let core = ffi.to_core().unwrap();
        assert_eq!(core.water_proximity, WaterProximity::PreviousGeneration);
        assert_eq!(core.wind, WindDirection::North);
    }
}
