use clap::Parser;
use tracing::info;
use wildfire_ca_core::{
    run_ensemble, CellState, EnsembleSpec, Simulation, SimulationConfig, SpeciesDistribution,
    StateCensus, WindDirection,
};

/// Wildfire cellular automaton demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "wildfire-ca-demo")]
#[command(about = "Headless wildfire cellular automaton runner", long_about = None)]
struct Args {
    /// Grid width in cells (including the burnt border)
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Grid height in cells (including the burnt border)
    #[arg(long, default_value_t = 100)]
    height: usize,

    /// Number of generations to compute
    #[arg(short, long, default_value_t = 200)]
    frames: u64,

    /// Wind direction the wind comes from ("north", "south-west", "ne", "calm", ...)
    #[arg(short, long, default_value = "calm")]
    wind: WindDirection,

    /// Random seed; the same seed replays the same run
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Probability that empty ground or a dead tree sprouts a sapling
    #[arg(long, default_value_t = 0.05)]
    growth: f64,

    /// Probability of a lightning strike per draw
    #[arg(long, default_value_t = 0.0001)]
    lightning: f64,

    /// Spread multiplier next to water (1 = no effect, 0 = water blocks spread)
    #[arg(long, default_value_t = 1.0)]
    water_dampening: f64,

    /// Probability of skipping a diagonal neighbor when testing spread (0 = off)
    #[arg(long, default_value_t = 0.0)]
    diagonal_skip: f64,

    /// Print the census every N generations
    #[arg(short, long, default_value_t = 10)]
    report_interval: u64,

    /// Run N independent seeds (seed, seed+1, ...) in parallel and print a summary per seed
    #[arg(short, long)]
    ensemble: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = SimulationConfig::default()
        .with_wind(args.wind)
        .with_growth_probability(args.growth)
        .with_lightning_probability(args.lightning)
        .with_water_dampening(args.water_dampening)
        .with_diagonal_skip_probability(args.diagonal_skip);

    println!("=== Wildfire Cellular Automaton Demo ===\n");
    println!(
        "Grid: {}x{}, Wind: {}, Growth: {}, Lightning: {}, Water dampening: {}",
        args.width, args.height, config.wind, args.growth, args.lightning, args.water_dampening
    );

    let result = match args.ensemble {
        Some(members) => run_members(&args, config, members),
        None => run_single(&args, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_single(args: &Args, config: SimulationConfig) -> Result<(), wildfire_ca_core::ConfigError> {
    let mut sim = Simulation::new(
        config,
        args.width,
        args.height,
        &SpeciesDistribution::default(),
        args.seed,
    )?;

    println!("Seed: {}\n", args.seed);
    println!("Tick   | Burning | Vegetation | Census");
    println!("-------|---------|------------|-------");
    report(0, &sim.census());

    let interval = args.report_interval.max(1);
    let mut peak_burning = sim.census().burning();
    for _ in 0..args.frames {
        let census = sim.advance().census();
        peak_burning = peak_burning.max(census.burning());
        if sim.tick() % interval == 0 {
            report(sim.tick(), &census);
        }
    }

    let last = sim.census();
    println!("\n=== Simulation Complete ===");
    println!("Final tick: {}", sim.tick());
    println!("Peak burning cells: {peak_burning}");
    println!("Burnt ground: {}", last.get(CellState::BurnedGround));
    println!("Vegetation remaining: {}", last.vegetation());

    Ok(())
}

fn run_members(
    args: &Args,
    config: SimulationConfig,
    members: u64,
) -> Result<(), wildfire_ca_core::ConfigError> {
    let spec = EnsembleSpec {
        config,
        width: args.width,
        height: args.height,
        distribution: SpeciesDistribution::default(),
        ticks: args.frames,
    };
    let seeds: Vec<u64> = (0..members).map(|i| args.seed.wrapping_add(i)).collect();

    info!("Starting ensemble of {} runs", seeds.len());
    let runs = run_ensemble(&spec, &seeds)?;

    println!("\nSeed                 | Peak burning | Peak tick | Final vegetation | Final burnt");
    println!("---------------------|--------------|-----------|------------------|------------");
    for run in &runs {
        println!(
            "{:20} | {:12} | {:9} | {:16} | {:11}",
            run.seed,
            run.peak_burning,
            run.peak_tick,
            run.last.vegetation(),
            run.last.get(CellState::BurnedGround)
        );
    }

    Ok(())
}

fn report(tick: u64, census: &StateCensus) {
    println!(
        "{:6} | {:7} | {:10} | {}",
        tick,
        census.burning(),
        census.vegetation(),
        census
    );
}
