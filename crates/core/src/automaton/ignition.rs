//! Ignition rule for vegetation cells
//!
//! A vegetation cell catches fire by scanning its eight neighbors in
//! [`NEIGHBOR_OFFSETS`](crate::core_types::NEIGHBOR_OFFSETS) order. For each neighbor one
//! uniform roll `r` is scaled by the wind weight for that offset, and the product is
//! scaled again by the spread coefficient of the neighbor's fire stage. The first product
//! above [`IGNITION_THRESHOLD`] turns the cell into `Sparks` and ends the scan.
//!
//! Spread coefficients derive from the species susceptibility `s`:
//!
//! | Neighbor | Coefficient |
//! |----------|-------------|
//! | `Fire`   | `s`         |
//! | `Sparks` | `0.5·s`     |
//! | `Coals`  | `0.25·s`    |
//!
//! and are all multiplied by the water dampening factor when the cell borders water.
//!
//! Lightning is independent of neighbors. With `lightning_per_neighbor` set, every
//! neighbor that does not ignite the cell is followed by one lightning roll, so a cell can
//! be struck up to eight times per tick; a strike sets the result to `Fire` and the scan
//! carries on, so a later spread still wins with `Sparks`.

use rand::Rng;

use crate::core_types::{is_diagonal, susceptibility, CellState};
use crate::grid::{Grid, BOUNDARY_STATE};
use crate::simulation::{SimulationConfig, WaterProximity, IGNITION_THRESHOLD};

/// Spread coefficient per burning neighbor stage, relative to susceptibility
const FIRE_SPREAD_RATIO: f64 = 1.0;
const SPARKS_SPREAD_RATIO: f64 = 0.5;
const COALS_SPREAD_RATIO: f64 = 0.25;

/// Spread coefficients for one cell this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadCoefficients {
    pub fire: f64,
    pub sparks: f64,
    pub coals: f64,
}

impl SpreadCoefficients {
    pub fn for_susceptibility(susceptibility: f64) -> Self {
        Self {
            fire: FIRE_SPREAD_RATIO * susceptibility,
            sparks: SPARKS_SPREAD_RATIO * susceptibility,
            coals: COALS_SPREAD_RATIO * susceptibility,
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self {
            fire: self.fire * factor,
            sparks: self.sparks * factor,
            coals: self.coals * factor,
        }
    }

    /// Coefficient for a neighbor in `state`, `None` if it cannot spread fire
    #[inline]
    pub fn for_neighbor(&self, state: CellState) -> Option<f64> {
        match state {
            CellState::Fire => Some(self.fire),
            CellState::Sparks => Some(self.sparks),
            CellState::Coals => Some(self.coals),
            _ => None,
        }
    }

    /// True if a neighbor in `state` with wind-weighted roll `chance` ignites the cell
    #[inline]
    pub fn spreads(&self, state: CellState, chance: f64) -> bool {
        self.for_neighbor(state)
            .is_some_and(|coeff| chance * coeff > IGNITION_THRESHOLD)
    }
}

#[inline]
fn lightning_strikes<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

/// Decide the state of vegetation cell `(x, y)` after fire spread and lightning.
///
/// `species` is the cell's state after this tick's growth/aging rules. Neighbor fire
/// stages are read from `current`; the near-water test reads the grid chosen by
/// [`SimulationConfig::water_proximity`], by default `next`, the grid being built.
///
/// Returns `Sparks` on spread, `Fire` on a lightning strike without later spread, and
/// `species` unchanged otherwise. Non-vegetation `species` is returned as-is without any
/// draws.
pub fn try_ignite<R: Rng + ?Sized>(
    current: &Grid,
    next: &Grid,
    x: usize,
    y: usize,
    species: CellState,
    config: &SimulationConfig,
    rng: &mut R,
) -> CellState {
    let Some(susceptibility) = susceptibility(species) else {
        return species;
    };

    let water_grid = match config.water_proximity {
        WaterProximity::NextGeneration => next,
        WaterProximity::PreviousGeneration => current,
    };
    let mut coefficients = SpreadCoefficients::for_susceptibility(susceptibility);
    if water_grid.has_neighbor(x, y, CellState::Water) {
        coefficients = coefficients.scaled(config.water_dampening);
    }

    let mut result = species;
    for (index, &weight) in config.wind.influence_row().iter().enumerate() {
        if config.diagonal_skip_probability > 0.0
            && is_diagonal(index)
            && rng.random::<f64>() < config.diagonal_skip_probability
        {
            continue;
        }

        let neighbor = current.neighbor(x, y, index).unwrap_or(BOUNDARY_STATE);
        let chance = weight * rng.random::<f64>();
        if coefficients.spreads(neighbor, chance) {
            return CellState::Sparks;
        }

        if config.lightning_per_neighbor
            && lightning_strikes(rng, config.lightning_probability)
        {
            result = CellState::Fire;
        }
    }

    if !config.lightning_per_neighbor && lightning_strikes(rng, config.lightning_probability) {
        result = CellState::Fire;
    }

    result
}
