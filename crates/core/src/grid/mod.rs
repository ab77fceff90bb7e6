//! Cell grid, initial landscape mix and per-state statistics

pub mod cell_grid;
pub mod census;
pub mod distribution;

// Re-export main types
pub use cell_grid::{Grid, BOUNDARY_STATE};
pub use census::StateCensus;
pub use distribution::SpeciesDistribution;
