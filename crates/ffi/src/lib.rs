//! C ABI for the wildfire cellular automaton.
//!
//! Every fallible function returns a `WildfireErrorCode`; the message for the most recent
//! failure on the calling thread is available from `wildfire_get_last_error`.

mod config;
mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use config::{wildfire_config_default, WildfireConfig};
pub use error::{wildfire_get_last_error, wildfire_get_last_error_code, WildfireErrorCode};
pub use instance::{wildfire_destroy, wildfire_new, WildfireInstance};
pub use queries::{
    wildfire_get_cells, wildfire_get_census, wildfire_get_dimensions, GridCensus,
    WILDFIRE_CELL_STATE_COUNT,
};
pub use simulation::wildfire_advance;
