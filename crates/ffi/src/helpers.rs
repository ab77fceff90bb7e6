use std::ffi::CString;

use wildfire_ca_core::Simulation;

use crate::error::{with_last_error_mut, DefaultWildfireError, WildfireError, WildfireErrorCode};
use crate::instance::WildfireInstance;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl WildfireError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = WildfireErrorCode::Ok;
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl WildfireError) -> WildfireErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the outcome of `result`: errors go to thread-local storage, success clears it.
pub(crate) fn track_result<T>(
    result: Result<T, DefaultWildfireError>,
) -> Result<T, WildfireErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run `f` and translate its result into an FFI error code.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> WildfireErrorCode
where
    F: FnOnce() -> Result<(), DefaultWildfireError>,
{
    match track_result(f()) {
        Ok(()) => WildfireErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow the instance behind `ptr`.
///
/// # Safety
/// `ptr` must be null or a pointer returned by `wildfire_new` that has not been destroyed.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const WildfireInstance,
) -> Result<&'a WildfireInstance, DefaultWildfireError> {
    // SAFETY: caller guarantees `ptr` is null or a live instance from `wildfire_new`.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultWildfireError::null_pointer("ptr"))
}

/// Run `f` with shared access to the simulation.
pub(crate) fn with_sim<F, T>(instance: &WildfireInstance, f: F) -> Result<T, DefaultWildfireError>
where
    F: FnOnce(&Simulation) -> T,
{
    let sim = instance
        .sim
        .read()
        .map_err(|_| DefaultWildfireError::lock_poisoned("sim"))?;
    Ok(f(&sim))
}

/// Run `f` with exclusive access to the simulation.
pub(crate) fn with_sim_mut<F, T>(
    instance: &WildfireInstance,
    f: F,
) -> Result<T, DefaultWildfireError>
where
    F: FnOnce(&mut Simulation) -> T,
{
    let mut sim = instance
        .sim
        .write()
        .map_err(|_| DefaultWildfireError::lock_poisoned("sim"))?;
    Ok(f(&mut sim))
}
