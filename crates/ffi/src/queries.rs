use std::ptr;

use wildfire_ca_core::{CellState, StateCensus};

use crate::error::{DefaultWildfireError, WildfireErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_sim};
use crate::instance::WildfireInstance;

/// Number of distinct cell states; the length of `GridCensus::counts`.
pub const WILDFIRE_CELL_STATE_COUNT: usize = 11;

const _: () = assert!(WILDFIRE_CELL_STATE_COUNT == CellState::COUNT);

#[repr(C)]
/// FFI-friendly per-state cell counts of the current grid.
/// `counts` is indexed by cell state discriminant
/// (0 = Empty, 1 = Sapling, 2 = Tree, 3 = `OldTree`, 4 = `DeadTree`, 5 = Stone,
/// 6 = Water, 7 = Sparks, 8 = Fire, 9 = Coals, 10 = `BurnedGround`).
pub struct GridCensus {
    /// Cells per state.
    pub counts: [usize; WILDFIRE_CELL_STATE_COUNT],
    /// Cells in Sparks, Fire or Coals.
    pub burning: usize,
    /// Cells in any vegetation stage.
    pub vegetation: usize,
    /// Generations computed so far.
    pub tick: u64,
}

impl GridCensus {
    fn new(census: &StateCensus, tick: u64) -> Self {
        let mut counts = [0; WILDFIRE_CELL_STATE_COUNT];
        for (state, count) in census.entries() {
            counts[state.index()] = count;
        }
        Self {
            counts,
            burning: census.burning(),
            vegetation: census.vegetation(),
            tick,
        }
    }
}

/// Read the grid dimensions in cells.
///
/// Returns
/// - `WildfireErrorCode::Ok` (0) on success
/// - `WildfireErrorCode::NullPointer` if any pointer is null
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `wildfire_new`.
/// - `out_width` and `out_height` must be valid pointers to `usize`.
#[no_mangle]
pub unsafe extern "C" fn wildfire_get_dimensions(
    ptr: *const WildfireInstance,
    out_width: *mut usize,
    out_height: *mut usize,
) -> WildfireErrorCode {
    if out_width.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_width"));
    }
    if out_height.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_height"));
    }

    handle_ffi_result_error(|| {
        // SAFETY: caller guarantees `ptr` is null or a live instance.
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let (width, height) = with_sim(instance, |sim| (sim.grid().width(), sim.grid().height()))?;
        unsafe {
            *out_width = width;
            *out_height = height;
        }
        Ok(())
    })
}

/// Return a borrowed pointer to the current grid as row-major cell state bytes.
///
/// Cell `(x, y)` is at index `y * width + x`; each byte is a cell state discriminant
/// (see `GridCensus`). The buffer is reused internally to avoid per-frame allocations.
///
/// - **DO NOT FREE THIS POINTER**.
/// - The pointer is invalidated by the next call to `wildfire_get_cells` or
///   `wildfire_destroy`.
///
/// Returns
/// - `WildfireErrorCode::Ok` (0) on success with the buffer in `out_cells` and its length in `out_len`
/// - `WildfireErrorCode::NullPointer` if `ptr`, `out_len`, or `out_cells` is null
/// - `WildfireErrorCode::LockPoisoned` if an internal lock is poisoned
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `wildfire_new` or null.
/// - `out_len` must be a valid, non-null pointer to a `usize`.
/// - `out_cells` must be a valid, non-null pointer to a `*const u8`.
#[no_mangle]
pub unsafe extern "C" fn wildfire_get_cells(
    ptr: *const WildfireInstance,
    out_len: *mut usize,
    out_cells: *mut *const u8,
) -> WildfireErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_len"));
    }

    if out_cells.is_null() {
        unsafe {
            *out_len = 0;
        }
        return track_error(&DefaultWildfireError::null_pointer("out_cells"));
    }

    let result = handle_ffi_result_error(|| {
        // SAFETY: caller guarantees `ptr` is null or a live instance.
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let mut snapshot = instance
            .cells_snapshot
            .lock()
            .map_err(|_| DefaultWildfireError::lock_poisoned("cells_snapshot"))?;
        snapshot.clear(); // keeps capacity

        with_sim(instance, |sim| {
            snapshot.extend(sim.grid().cells().iter().map(|&c| c as u8));
        })?;

        unsafe {
            *out_len = snapshot.len();
            *out_cells = snapshot.as_ptr();
        }
        Ok(())
    });

    // Set to null on error (per documentation contract)
    if result != WildfireErrorCode::Ok {
        unsafe {
            *out_cells = ptr::null();
            *out_len = 0;
        }
    }

    result
}

/// Fill `out_census` with per-state counts of the current grid.
///
/// Returns
/// - `WildfireErrorCode::Ok` (0) on success
/// - `WildfireErrorCode::NullPointer` if `ptr` or `out_census` is null
/// - `WildfireErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `wildfire_new`.
/// - `out_census` must be a valid, non-null pointer to a `GridCensus`.
#[no_mangle]
pub unsafe extern "C" fn wildfire_get_census(
    ptr: *const WildfireInstance,
    out_census: *mut GridCensus,
) -> WildfireErrorCode {
    if out_census.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_census"));
    }

    handle_ffi_result_error(|| {
        // SAFETY: caller guarantees `ptr` is null or a live instance.
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let census = with_sim(instance, |sim| GridCensus::new(&sim.census(), sim.tick()))?;
        unsafe {
            *out_census = census;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::wildfire_config_default;
    use crate::instance::{wildfire_destroy, wildfire_new};
    use crate::simulation::wildfire_advance;

    fn new_instance(width: usize, height: usize) -> *mut WildfireInstance {
        let mut instance = ptr::null_mut();
        let code = unsafe {
            wildfire_new(wildfire_config_default(), width, height, ptr::null(), 0, 11, &mut instance)
        };
        assert_eq!(code, WildfireErrorCode::Ok);
        instance
    }

    #[test]
    fn test_dimensions() {
        let instance = new_instance(14, 9);
        let (mut w, mut h) = (0, 0);
        let code = unsafe { wildfire_get_dimensions(instance, &mut w, &mut h) };
        assert_eq!(code, WildfireErrorCode::Ok);
        assert_eq!((w, h), (14, 9));
        unsafe { wildfire_destroy(instance) };
    }

    #[test]
    fn test_cells_snapshot_has_burnt_boundary() {
        let instance = new_instance(8, 6);
        unsafe { wildfire_advance(instance, ptr::null_mut()) };

        let mut len = 0;
        let mut cells = ptr::null();
        let code = unsafe { wildfire_get_cells(instance, &mut len, &mut cells) };
        assert_eq!(code, WildfireErrorCode::Ok);
        assert_eq!(len, 48);

        let bytes = unsafe { std::slice::from_raw_parts(cells, len) };
        let burnt = CellState::BurnedGround as u8;
        assert!(bytes[..8].iter().all(|&b| b == burnt));
        assert!(bytes[40..].iter().all(|&b| b == burnt));
        assert!(bytes.iter().all(|&b| CellState::from_id(b).is_some()));
        unsafe { wildfire_destroy(instance) };
    }

    #[test]
    fn test_census_totals() {
        let instance = new_instance(10, 10);
        let mut census = GridCensus {
            counts: [0; WILDFIRE_CELL_STATE_COUNT],
            burning: 0,
            vegetation: 0,
            tick: 99,
        };
        let code = unsafe { wildfire_get_census(instance, &mut census) };
        assert_eq!(code, WildfireErrorCode::Ok);
        assert_eq!(census.counts.iter().sum::<usize>(), 100);
        assert_eq!(census.tick, 0);
        unsafe { wildfire_destroy(instance) };
    }

    #[test]
    fn test_null_outputs_rejected() {
        let instance = new_instance(5, 5);
        let mut len = 7;
        let code = unsafe { wildfire_get_cells(instance, &mut len, ptr::null_mut()) };
        assert_eq!(code, WildfireErrorCode::NullPointer);
        assert_eq!(len, 0);

        let code = unsafe { wildfire_get_census(instance, ptr::null_mut()) };
        assert_eq!(code, WildfireErrorCode::NullPointer);
        unsafe { wildfire_destroy(instance) };
    }
}
