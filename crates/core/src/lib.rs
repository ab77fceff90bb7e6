//! Wildfire Cellular Automaton Core Library
//!
//! A probabilistic cellular automaton for wildfire spread over a 2-D landscape. Every
//! cell holds one discrete state (bare ground, vegetation stage, rock, water, or a fire
//! stage) and changes once per tick based on its own state and its eight neighbors.
//!
//! ## Model
//!
//! - Vegetation grows, matures, ages and dies: `Empty → Sapling → Tree → OldTree → DeadTree`
//! - Fire burns down deterministically: `Sparks → Fire → Coals → BurnedGround`
//! - Vegetation ignites from burning neighbors, weighted by wind direction, species
//!   flammability and proximity to water, or from lightning
//! - The outer ring of the grid is permanently burnt out
//!
//! All randomness comes from an explicit seedable source, so a seed replays a run exactly.
//!
//! ```
//! use wildfire_ca_core::{Simulation, SimulationConfig, SpeciesDistribution, WindDirection};
//!
//! let config = SimulationConfig::default().with_wind(WindDirection::NorthEast);
//! let mut sim = Simulation::new(config, 64, 48, &SpeciesDistribution::default(), 7)?;
//! for grid in sim.frames(10) {
//!     assert!(grid.boundary_intact());
//! }
//! # Ok::<(), wildfire_ca_core::ConfigError>(())
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

pub mod automaton;
pub mod grid;
pub mod simulation;

// Re-export core types
pub use core_types::{CellState, WindDirection, NEIGHBOR_OFFSETS, WIND_INFLUENCE};
pub use error::ConfigError;

pub use automaton::{step, try_ignite};
pub use grid::{Grid, SpeciesDistribution, StateCensus};
pub use simulation::{
    run_ensemble, EnsembleRun, EnsembleSpec, SimRng, Simulation, SimulationConfig,
    WaterProximity,
};
