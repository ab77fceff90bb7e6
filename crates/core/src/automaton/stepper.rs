//! One generation of the automaton
//!
//! The next grid starts as a copy of the current one with the boundary reset, then every
//! interior cell is rewritten column by column. Each cell first takes its own
//! growth/aging/decay transition (reading only its previous state), and if the result is
//! vegetation the ignition rule may override it with `Sparks` or `Fire`.

use rand::Rng;

use crate::automaton::ignition::try_ignite;
use crate::core_types::CellState;
use crate::grid::Grid;
use crate::simulation::SimulationConfig;

#[inline]
fn roll<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

/// Non-fire transition of a single cell from its previous state.
///
/// Stochastic states draw exactly one value; every other state is deterministic and draws
/// nothing.
pub fn progress<R: Rng + ?Sized>(
    state: CellState,
    config: &SimulationConfig,
    rng: &mut R,
) -> CellState {
    match state {
        CellState::Empty | CellState::DeadTree => {
            if roll(rng, config.growth_probability) {
                CellState::Sapling
            } else {
                state
            }
        }
        CellState::Sapling => {
            if roll(rng, config.sapling_maturation_probability) {
                CellState::Tree
            } else {
                CellState::Sapling
            }
        }
        CellState::Tree => {
            if roll(rng, config.tree_aging_probability) {
                CellState::OldTree
            } else {
                CellState::Tree
            }
        }
        CellState::OldTree => {
            if roll(rng, config.old_tree_death_probability) {
                CellState::DeadTree
            } else {
                CellState::OldTree
            }
        }
        CellState::Sparks => CellState::Fire,
        CellState::Fire => CellState::Coals,
        CellState::Coals => CellState::BurnedGround,
        CellState::Stone | CellState::Water | CellState::BurnedGround => state,
    }
}

/// Compute the generation after `current`.
///
/// Total over any grid and validated configuration; `current` is never modified.
pub fn step<R: Rng + ?Sized>(current: &Grid, config: &SimulationConfig, rng: &mut R) -> Grid {
    let mut next = current.clone();
    next.force_boundary();

    for (x, y) in current.interior() {
        let species = progress(current.state(x, y), config, rng);
        next.set(x, y, species);

        if species.is_vegetation() {
            let ignited = try_ignite(current, &next, x, y, species, config, rng);
            next.set(x, y, ignited);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::WindDirection;
    use crate::simulation::rng::test_support::FixedRng;
    use crate::simulation::SimRng;

    #[test]
    fn test_fire_lifecycle_is_deterministic() {
        let config = SimulationConfig::default();
        let mut rng = FixedRng::zero();
        assert_eq!(progress(CellState::Sparks, &config, &mut rng), CellState::Fire);
        assert_eq!(progress(CellState::Fire, &config, &mut rng), CellState::Coals);
        assert_eq!(progress(CellState::Coals, &config, &mut rng), CellState::BurnedGround);
        assert_eq!(
            progress(CellState::BurnedGround, &config, &mut rng),
            CellState::BurnedGround
        );
    }

    #[test]
    fn test_certain_transitions() {
        let config = SimulationConfig::default()
            .with_growth_probability(1.0)
            .with_old_tree_death_probability(1.0);
        let mut rng = SimRng::from_seed_u64(2);
        assert_eq!(progress(CellState::Empty, &config, &mut rng), CellState::Sapling);
        assert_eq!(progress(CellState::DeadTree, &config, &mut rng), CellState::Sapling);
        assert_eq!(progress(CellState::Sapling, &config, &mut rng), CellState::Tree);
        assert_eq!(progress(CellState::Tree, &config, &mut rng), CellState::OldTree);
        assert_eq!(progress(CellState::OldTree, &config, &mut rng), CellState::DeadTree);
    }

    #[test]
    fn test_zero_probabilities_hold_state() {
        let config = SimulationConfig::frozen();
        let mut rng = FixedRng::zero();
        for state in CellState::VEGETATION {
            assert_eq!(progress(state, &config, &mut rng), state);
        }
        assert_eq!(progress(CellState::Empty, &config, &mut rng), CellState::Empty);
    }

    #[test]
    fn test_terrain_absorbing() {
        let config = SimulationConfig::default().with_growth_probability(1.0);
        let mut rng = SimRng::from_seed_u64(4);
        assert_eq!(progress(CellState::Stone, &config, &mut rng), CellState::Stone);
        assert_eq!(progress(CellState::Water, &config, &mut rng), CellState::Water);
    }

    #[test]
    fn test_step_restores_boundary_and_keeps_input() {
        let mut current = Grid::new(4, 4, CellState::Stone).unwrap();
        current.set(0, 0, CellState::Fire);
        current.set(3, 2, CellState::Tree);
        let snapshot = current.clone();

        let mut rng = SimRng::from_seed_u64(6);
        let next = step(&current, &SimulationConfig::default(), &mut rng);

        assert_eq!(current, snapshot);
        assert!(next.boundary_intact());
        for (x, y) in next.interior() {
            assert_eq!(next.state(x, y), CellState::Stone);
        }
    }

    #[test]
    fn test_ignition_sees_progressed_species() {
        let mut current = Grid::new(5, 5, CellState::Fire).unwrap();
        current.set(2, 2, CellState::DeadTree);
        let mut rng = FixedRng::max();

        // Regrown into a sapling first, whose 0.5 susceptibility keeps a calm product at 0.5
        let config = SimulationConfig::frozen().with_growth_probability(1.0);
        let next = step(&current, &config, &mut rng);
        assert_eq!(next.state(2, 2), CellState::Sapling);

        // Left as dead timber it catches at once
        let next = step(&current, &SimulationConfig::frozen(), &mut rng);
        assert_eq!(next.state(2, 2), CellState::Sparks);

        // Bare ground that sprouts this tick can burn this tick under a strong wind
        current.set(2, 2, CellState::Empty);
        let config = config.with_wind(WindDirection::North);
        let next = step(&current, &config, &mut rng);
        assert_eq!(next.state(2, 2), CellState::Sparks);
    }
}
