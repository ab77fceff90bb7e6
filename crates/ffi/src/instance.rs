use std::ptr;
use std::slice;
use std::sync::{Mutex, RwLock};

use wildfire_ca_core::{CellState, Simulation, SpeciesDistribution};

use crate::config::WildfireConfig;
use crate::error::{DefaultWildfireError, WildfireErrorCode};
use crate::helpers::{track_error, track_result};

/// The wildfire simulation context.
/// Holds the automaton and a reusable buffer for cell snapshots handed to the caller.
///
/// # Thread Safety
/// The simulation sits behind an `RwLock`: queries take a shared lock,
/// `wildfire_advance` takes an exclusive one. Each instance owns its own random
/// stream, so separate instances never influence each other.
///
/// # Example (C)
/// ```c
/// WildfireConfig config = wildfire_config_default();
/// config.wind = 3; // North
///
/// WildfireInstance* sim = NULL;
/// if (wildfire_new(config, 100, 100, NULL, 0, 42, &sim) != Ok) {
///     fprintf(stderr, "%s\n", wildfire_get_last_error());
///     return;
/// }
///
/// for (int frame = 0; frame < 200; frame++) {
///     wildfire_advance(sim, NULL);
///     uintptr_t len = 0;
///     const uint8_t* cells = NULL;
///     wildfire_get_cells(sim, &len, &cells);
///     draw_frame(cells, len);
/// }
///
/// wildfire_destroy(sim);
/// ```
pub struct WildfireInstance {
    pub(crate) sim: RwLock<Simulation>,
    /// Cached row-major cell bytes, reused across calls to `wildfire_get_cells`.
    pub(crate) cells_snapshot: Mutex<Vec<u8>>,
}

impl WildfireInstance {
    /// Creates a new instance with a randomly populated grid.
    ///
    /// `distribution`, when given, holds one weight per cell state in discriminant order
    /// and must sum to 1.
    pub(crate) fn new(
        config: WildfireConfig,
        width: usize,
        height: usize,
        distribution: Option<&[f64]>,
        seed: u64,
    ) -> Result<Box<Self>, DefaultWildfireError> {
        let config = config.to_core()?;

        let distribution = match distribution {
            None => SpeciesDistribution::default(),
            Some(weights) => {
                if weights.len() != CellState::COUNT {
                    return Err(DefaultWildfireError::invalid_parameter(format!(
                        "distribution must have {} weights, got {}",
                        CellState::COUNT,
                        weights.len()
                    )));
                }
                SpeciesDistribution::new(CellState::ALL.into_iter().zip(weights.iter().copied()))?
            }
        };

        let sim = Simulation::new(config, width, height, &distribution, seed)?;
        let cell_count = sim.grid().cells().len();

        Ok(Box::new(Self {
            sim: RwLock::new(sim),
            cells_snapshot: Mutex::new(Vec::with_capacity(cell_count)),
        }))
    }
}

/// Create a new wildfire instance and return it via out-parameter.
///
/// Parameters
/// - `config`: simulation parameters, typically from `wildfire_config_default()`.
/// - `width`, `height`: grid size in cells, both at least 3.
/// - `distribution`: optional pointer to `distribution_len` initial-state weights, one per
///   cell state in discriminant order (`distribution_len` must be 11). Pass null for the
///   default landscape mix.
/// - `seed`: random seed; the same seed and inputs replay the same run.
/// - `out_instance`: receives the instance on success, null on failure.
///
/// Returns
/// - `WildfireErrorCode::Ok` (0) — success
/// - `WildfireErrorCode::NullPointer` — `out_instance` is null
/// - `WildfireErrorCode::InvalidConfig` — configuration, grid size (too small or too large) or
///   distribution rejected
/// - `WildfireErrorCode::InvalidParameter` — `distribution_len` is not 11
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - `distribution` must be null or point to `distribution_len` readable `f64` values.
/// - The caller takes ownership of the returned instance and MUST call `wildfire_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn wildfire_new(
    config: WildfireConfig,
    width: usize,
    height: usize,
    distribution: *const f64,
    distribution_len: usize,
    seed: u64,
    out_instance: *mut *mut WildfireInstance,
) -> WildfireErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_instance"));
    }

    let weights = if distribution.is_null() {
        None
    } else {
        // SAFETY: caller guarantees `distribution_len` readable values behind the pointer.
        Some(unsafe { slice::from_raw_parts(distribution, distribution_len) })
    };

    match track_result(WildfireInstance::new(config, width, height, weights, seed)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            WildfireErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroys an instance previously created by `wildfire_new`.
///
/// If `ptr` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `wildfire_new` and not destroyed already.
/// - The caller must not use the pointer afterwards.
#[no_mangle]
pub unsafe extern "C" fn wildfire_destroy(ptr: *mut WildfireInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: The pointer was created by `Box::into_raw` in `wildfire_new` and is not
    // used again by the caller.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
