//! Simulation parameters
//!
//! Every knob of the automaton lives in [`SimulationConfig`], a plain value handed to each
//! step. There is no global state, so any number of simulations can run side by side.

use serde::{Deserialize, Serialize};

use crate::core_types::WindDirection;
use crate::error::{check_probability, ConfigError};

/// A spread roll must exceed this value for a burning neighbor to ignite a cell
pub const IGNITION_THRESHOLD: f64 = 0.5;

/// Diagonal skip chance used by the classic forest-fire model
pub const ORIGINAL_DIAGONAL_SKIP: f64 = 0.573;

/// Which generation the near-water test inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WaterProximity {
    /// The grid being built this tick. Cells earlier in the scan already hold their new
    /// state and the boundary has been reset, so boundary water does not count.
    #[default]
    NextGeneration,
    /// The grid as it was at the start of the tick
    PreviousGeneration,
}

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// `Empty`/`DeadTree` → `Sapling`
    pub growth_probability: f64,
    /// `Sapling` → `Tree`
    pub sapling_maturation_probability: f64,
    /// `Tree` → `OldTree`
    pub tree_aging_probability: f64,
    /// `OldTree` → `DeadTree`
    pub old_tree_death_probability: f64,
    /// Chance of a lightning strike per lightning draw
    pub lightning_probability: f64,
    /// Multiplier on spread coefficients next to water (1 = no effect, 0 = no spread)
    pub water_dampening: f64,
    pub wind: WindDirection,
    /// Chance to skip a diagonal neighbor before testing it (0 = never)
    pub diagonal_skip_probability: f64,
    /// Draw lightning once per non-igniting neighbor (`true`) or once per cell (`false`)
    pub lightning_per_neighbor: bool,
    pub water_proximity: WaterProximity,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            growth_probability: 0.05,
            sapling_maturation_probability: 1.0,
            tree_aging_probability: 1.0,
            old_tree_death_probability: 0.01,
            lightning_probability: 0.0001,
            water_dampening: 1.0,
            wind: WindDirection::Calm,
            diagonal_skip_probability: 0.0,
            lightning_per_neighbor: true,
            water_proximity: WaterProximity::NextGeneration,
        }
    }
}

impl SimulationConfig {
    /// Configuration in which nothing grows, ages, dies or is struck by lightning.
    /// Only fire already present evolves.
    pub fn frozen() -> Self {
        Self {
            growth_probability: 0.0,
            sapling_maturation_probability: 0.0,
            tree_aging_probability: 0.0,
            old_tree_death_probability: 0.0,
            lightning_probability: 0.0,
            ..Self::default()
        }
    }

    pub fn with_growth_probability(mut self, p: f64) -> Self {
        self.growth_probability = p;
        self
    }

    pub fn with_sapling_maturation_probability(mut self, p: f64) -> Self {
        self.sapling_maturation_probability = p;
        self
    }

    pub fn with_tree_aging_probability(mut self, p: f64) -> Self {
        self.tree_aging_probability = p;
        self
    }

    pub fn with_old_tree_death_probability(mut self, p: f64) -> Self {
        self.old_tree_death_probability = p;
        self
    }

    pub fn with_lightning_probability(mut self, f: f64) -> Self {
        self.lightning_probability = f;
        self
    }

    pub fn with_water_dampening(mut self, w: f64) -> Self {
        self.water_dampening = w;
        self
    }

    pub fn with_wind(mut self, wind: WindDirection) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_diagonal_skip_probability(mut self, p: f64) -> Self {
        self.diagonal_skip_probability = p;
        self
    }

    pub fn with_lightning_per_neighbor(mut self, per_neighbor: bool) -> Self {
        self.lightning_per_neighbor = per_neighbor;
        self
    }

    pub fn with_water_proximity(mut self, source: WaterProximity) -> Self {
        self.water_proximity = source;
        self
    }

    /// Check every probability-like field lies in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ProbabilityOutOfRange`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("growth_probability", self.growth_probability)?;
        check_probability(
            "sapling_maturation_probability",
            self.sapling_maturation_probability,
        )?;
        check_probability("tree_aging_probability", self.tree_aging_probability)?;
        check_probability(
            "old_tree_death_probability",
            self.old_tree_death_probability,
        )?;
        check_probability("lightning_probability", self.lightning_probability)?;
        check_probability("water_dampening", self.water_dampening)?;
        check_probability("diagonal_skip_probability", self.diagonal_skip_probability)?;
        Ok(())
    }
}
