//! Behavioural properties of the wildfire automaton
//!
//! These tests drive whole grids through many generations and check the invariants that
//! must hold regardless of the random draws.

use wildfire_ca_core::{
    step, CellState, ConfigError, EnsembleSpec, Grid, SimRng, Simulation, SimulationConfig,
    SpeciesDistribution, WindDirection,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn busy_config() -> SimulationConfig {
    SimulationConfig::default()
        .with_growth_probability(0.1)
        .with_lightning_probability(0.01)
        .with_old_tree_death_probability(0.05)
}

#[test]
fn test_boundary_burnt_out_every_tick() {
    let mut sim = Simulation::new(busy_config(), 30, 20, &SpeciesDistribution::default(), 1)
        .unwrap();
    assert!(sim.grid().boundary_intact());

    for _ in 0..50 {
        let grid = sim.advance();
        assert!(grid.boundary_intact(), "tick {}", sim.tick());
    }
}

#[test]
fn test_fire_lifecycle_progresses_one_stage_per_tick() {
    let mut sim = Simulation::new(busy_config(), 25, 25, &SpeciesDistribution::default(), 2)
        .unwrap();

    for _ in 0..40 {
        let before = sim.grid().clone();
        let after = sim.advance();
        for (x, y) in before.interior() {
            let was = before.state(x, y);
            let now = after.state(x, y);
            match was {
                CellState::Sparks => assert_eq!(now, CellState::Fire),
                CellState::Fire => assert_eq!(now, CellState::Coals),
                CellState::Coals | CellState::BurnedGround => {
                    assert_eq!(now, CellState::BurnedGround);
                }
                _ => {}
            }
        }
    }
}

#[test]
fn test_stone_and_water_invariant() {
    let mut sim = Simulation::new(
        busy_config().with_wind(WindDirection::SouthWest),
        30,
        30,
        &SpeciesDistribution::default(),
        3,
    )
    .unwrap();
    let initial = sim.grid().clone();

    sim.run(60);
    for (x, y) in initial.interior() {
        let state = initial.state(x, y);
        if matches!(state, CellState::Stone | CellState::Water) {
            assert_eq!(sim.grid().state(x, y), state, "({x}, {y})");
        }
    }
}

#[test]
fn test_no_fire_without_source_or_lightning() {
    let distribution = SpeciesDistribution::new([
        (CellState::Empty, 0.3),
        (CellState::Sapling, 0.2),
        (CellState::Tree, 0.2),
        (CellState::OldTree, 0.1),
        (CellState::DeadTree, 0.1),
        (CellState::Water, 0.05),
        (CellState::Stone, 0.05),
    ])
    .unwrap();
    let config = SimulationConfig::default()
        .with_lightning_probability(0.0)
        .with_growth_probability(0.2)
        .with_old_tree_death_probability(0.2);
    let mut sim = Simulation::new(config, 40, 40, &distribution, 4).unwrap();

    for _ in 0..100 {
        let census = sim.advance().census();
        assert_eq!(census.burning(), 0, "tick {}", sim.tick());
    }
}

#[test]
fn test_total_water_dampening_shields_shoreline() {
    // Column of water at x = 1, trees at x = 2, fire everywhere else
    let width = 7;
    let height = 9;
    let mut grid = Grid::new(width, height, CellState::Fire).unwrap();
    for y in 1..height - 1 {
        grid.set(1, y, CellState::Water);
        grid.set(2, y, CellState::DeadTree);
    }
    let config = SimulationConfig::frozen().with_water_dampening(0.0);

    let mut rng = SimRng::from_seed_u64(5);
    for _ in 0..200 {
        let next = step(&grid, &config, &mut rng);
        for y in 1..height - 1 {
            assert_eq!(next.state(2, y), CellState::DeadTree);
        }
    }
}

#[test]
fn test_single_fire_in_calm_forest() {
    let mut grid = Grid::new(5, 5, CellState::Tree).unwrap();
    grid.set(2, 2, CellState::Fire);
    let config = SimulationConfig::frozen()
        .with_wind(WindDirection::Calm)
        .with_water_dampening(1.0);

    for seed in 0..50 {
        let mut rng = SimRng::from_seed_u64(seed);
        let next = step(&grid, &config, &mut rng);

        assert_eq!(next.state(2, 2), CellState::Coals);
        assert!(next.boundary_intact());
        for (x, y) in next.interior() {
            if next.state(x, y) == CellState::Sparks {
                assert!(x.abs_diff(2) <= 1 && y.abs_diff(2) <= 1 && (x, y) != (2, 2));
            } else if (x, y) != (2, 2) {
                assert_eq!(next.state(x, y), CellState::Tree);
            }
        }
    }
}

#[test]
fn test_all_empty_stays_empty() {
    let config = SimulationConfig::frozen();
    let mut sim =
        Simulation::new(config, 15, 12, &SpeciesDistribution::single(CellState::Empty), 6)
            .unwrap();

    for _ in 0..30 {
        let census = sim.advance().census();
        assert_eq!(census.get(CellState::Empty), 13 * 10);
        assert_eq!(census.get(CellState::BurnedGround), 15 * 12 - 13 * 10);
    }
}

#[test]
fn test_corrupted_boundary_restored_by_first_step() {
    let mut cells = vec![CellState::Water; 6 * 6];
    cells[6 * 2 + 2] = CellState::Tree;
    let grid = Grid::from_cells(6, 6, cells).unwrap();
    assert!(!grid.boundary_intact());

    let mut sim = Simulation::with_grid(SimulationConfig::default(), grid, 7).unwrap();
    assert!(sim.advance().boundary_intact());
    assert!(sim.advance().boundary_intact());
}

#[test]
fn test_burnt_ground_is_permanent() {
    let mut sim = Simulation::new(busy_config(), 30, 30, &SpeciesDistribution::default(), 8)
        .unwrap();
    sim.run(20);
    let burnt: Vec<(usize, usize)> = sim
        .grid()
        .interior()
        .filter(|&(x, y)| sim.grid().state(x, y) == CellState::BurnedGround)
        .collect();

    sim.run(20);
    for (x, y) in burnt {
        assert_eq!(sim.grid().state(x, y), CellState::BurnedGround);
    }
}

#[test]
fn test_invalid_configuration_fails_before_first_tick() {
    let distribution = SpeciesDistribution::default();
    assert!(matches!(
        Simulation::new(SimulationConfig::default(), 3, 2, &distribution, 0),
        Err(ConfigError::GridTooSmall { width: 3, height: 2 })
    ));
    assert!(matches!(
        Simulation::new(
            SimulationConfig::default().with_tree_aging_probability(1.01),
            10,
            10,
            &distribution,
            0
        ),
        Err(ConfigError::ProbabilityOutOfRange { .. })
    ));
    assert!(matches!(
        SpeciesDistribution::new([(CellState::Tree, 0.9), (CellState::Empty, 0.2)]),
        Err(ConfigError::DistributionSum { .. })
    ));
    assert!(matches!(
        "sideways".parse::<WindDirection>(),
        Err(ConfigError::UnknownWindDirection(_))
    ));
}

#[test]
fn test_loaded_setups_are_validated() {
    let spec = EnsembleSpec {
        config: SimulationConfig::default(),
        width: 12,
        height: 12,
        distribution: SpeciesDistribution::default(),
        ticks: 5,
    };
    let mut value = serde_json::to_value(&spec).unwrap();
    assert_eq!(serde_json::from_value::<EnsembleSpec>(value.clone()).unwrap(), spec);

    value["distribution"]["weights"][0] = serde_json::json!(0.9);
    assert!(serde_json::from_value::<EnsembleSpec>(value).is_err());

    // A grid that would break the stepper never reaches a simulation
    let loaded = serde_json::from_str::<Grid>(r#"{"width":5,"height":5,"cells":["Tree"]}"#);
    assert!(loaded.is_err());
}
