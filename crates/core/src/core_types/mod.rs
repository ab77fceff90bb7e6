//! Core types: cell states and wind

pub mod cell_state;
pub mod wind;

pub use cell_state::{susceptibility, CellState};
pub use wind::{is_diagonal, WindDirection, NEIGHBOR_OFFSETS, WIND_INFLUENCE};
