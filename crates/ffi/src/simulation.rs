use crate::error::WildfireErrorCode;
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, with_sim_mut};
use crate::instance::WildfireInstance;

/// Advance the simulation by one generation.
///
/// Thread-safe: acquires the `RwLock` write lock for the step.
///
/// Returns
/// - `WildfireErrorCode::Ok` (0) on success; `out_tick` (if non-null) receives the new tick
/// - `WildfireErrorCode::NullPointer` if `ptr` is null
/// - `WildfireErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// - `ptr` must be null or a valid pointer returned by `wildfire_new`.
/// - `out_tick` must be null or a valid pointer to a `u64`.
#[no_mangle]
pub unsafe extern "C" fn wildfire_advance(
    ptr: *const WildfireInstance,
    out_tick: *mut u64,
) -> WildfireErrorCode {
    handle_ffi_result_error(|| {
        // SAFETY: caller guarantees `ptr` is null or a live instance.
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let tick = with_sim_mut(instance, |sim| {
            sim.advance();
            sim.tick()
        })?;

        if !out_tick.is_null() {
            unsafe {
                *out_tick = tick;
            }
        }
        Ok(())
    })
}
