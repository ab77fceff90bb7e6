//! Simulation driver
//!
//! [`Simulation`] owns the configuration, the current grid, a tick counter and its own
//! random source. Each [`Simulation::advance`] computes a full new generation before
//! swapping it in, so callers only ever observe complete grids.

pub mod config;
pub mod ensemble;
pub mod rng;

pub use config::{SimulationConfig, WaterProximity, IGNITION_THRESHOLD, ORIGINAL_DIAGONAL_SKIP};
pub use ensemble::{run_ensemble, EnsembleRun, EnsembleSpec};
pub use rng::SimRng;

use tracing::{debug, info};

use crate::automaton::step;
use crate::error::ConfigError;
use crate::grid::{Grid, SpeciesDistribution, StateCensus};

/// A running wildfire automaton
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    tick: u64,
    rng: SimRng,
}

impl Simulation {
    /// Create a simulation with a randomly populated `width × height` grid
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation or the grid is smaller
    /// than 3×3.
    pub fn new(
        config: SimulationConfig,
        width: usize,
        height: usize,
        distribution: &SpeciesDistribution,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SimRng::from_seed_u64(seed);
        let grid = Grid::random(width, height, distribution, &mut rng)?;

        info!(
            "Wildfire simulation initialized: {}x{} grid, wind={}, seed={}",
            width, height, config.wind, seed
        );

        Ok(Self {
            config,
            grid,
            tick: 0,
            rng,
        })
    }

    /// Create a simulation from a hand-built grid.
    ///
    /// The grid is used verbatim; a corrupted boundary is repaired by the first step.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn with_grid(config: SimulationConfig, grid: Grid, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "Wildfire simulation loaded: {}x{} grid, wind={}, seed={}",
            grid.width(),
            grid.height(),
            config.wind,
            seed
        );
        Ok(Self {
            config,
            grid,
            tick: 0,
            rng: SimRng::from_seed_u64(seed),
        })
    }

    /// Replace the grid with a fresh random one and reset the tick counter.
    ///
    /// Draws continue from the simulation's own random stream.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::GridTooSmall`] for dimensions below 3; the current grid is
    /// kept in that case.
    pub fn initialize(
        &mut self,
        width: usize,
        height: usize,
        distribution: &SpeciesDistribution,
    ) -> Result<&Grid, ConfigError> {
        let grid = Grid::random(width, height, distribution, &mut self.rng)?;
        info!("Wildfire grid re-initialized: {}x{}", width, height);
        self.grid = grid;
        self.tick = 0;
        Ok(&self.grid)
    }

    /// Run one generation and return the new grid
    pub fn advance(&mut self) -> &Grid {
        self.grid = step(&self.grid, &self.config, &mut self.rng);
        self.tick += 1;

        debug!(
            tick = self.tick,
            burning = self.grid.census().burning(),
            "Advanced wildfire grid"
        );

        &self.grid
    }

    /// Advance `ticks` generations without keeping intermediate grids
    pub fn run(&mut self, ticks: u64) -> &Grid {
        for _ in 0..ticks {
            self.advance();
        }
        &self.grid
    }

    /// Iterator yielding `count` successive snapshots, one per [`Simulation::advance`]
    pub fn frames(&mut self, count: usize) -> Frames<'_> {
        Frames {
            simulation: self,
            remaining: count,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generations computed since creation or the last [`Simulation::initialize`]
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn census(&self) -> StateCensus {
        self.grid.census()
    }
}

/// Snapshot iterator returned by [`Simulation::frames`]
#[derive(Debug)]
pub struct Frames<'a> {
    simulation: &'a mut Simulation,
    remaining: usize,
}

impl Iterator for Frames<'_> {
    type Item = Grid;

    fn next(&mut self) -> Option<Grid> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.simulation.advance().clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}
