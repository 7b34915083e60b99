//! FFI Duration functions

use std::ffi::{c_char, c_int, CString};
use std::ptr;

use clock_core::{format_time, Duration};
use crate::error::*;
use crate::handle;
use crate::types::ClockHandle;

/// Create a duration of whole seconds
/// Returns a handle that must be freed with clock_duration_free
#[no_mangle]
pub extern "C" fn clock_duration_from_secs(secs: u64) -> ClockHandle {
    handle_or_null(
        "clock_duration_from_secs",
        handle::register(Duration::from_secs(secs)),
    )
}

/// Create a duration from fractional seconds
/// Returns the null handle for negative, NaN or out-of-range input
#[no_mangle]
pub extern "C" fn clock_duration_from_secs_f64(secs: f64) -> ClockHandle {
    let result = Duration::try_from_secs_f64(secs)
        .map_err(HandleError::from)
        .and_then(handle::register);
    handle_or_null("clock_duration_from_secs_f64", result)
}

/// Free a duration handle
#[no_mangle]
pub extern "C" fn clock_duration_free(duration: ClockHandle) -> c_int {
    result_to_int(
        "clock_duration_free",
        handle::release::<Duration>(duration),
    )
}

/// Whole seconds, truncated. Returns 0 on error.
#[no_mangle]
pub extern "C" fn clock_duration_as_secs(duration: ClockHandle) -> u64 {
    value_or(
        "clock_duration_as_secs",
        handle::with(duration, |d: &Duration| d.as_secs()),
        0,
    )
}

/// Seconds including the fraction. Returns 0.0 on error.
#[no_mangle]
pub extern "C" fn clock_duration_as_secs_f64(duration: ClockHandle) -> f64 {
    value_or(
        "clock_duration_as_secs_f64",
        handle::with(duration, |d: &Duration| d.as_secs_f64()),
        0.0,
    )
}

#[no_mangle]
pub extern "C" fn clock_duration_is_zero(duration: ClockHandle) -> bool {
    value_or(
        "clock_duration_is_zero",
        handle::with(duration, |d: &Duration| d.is_zero()),
        false,
    )
}

/// Value equality. Returns false if either handle is invalid.
#[no_mangle]
pub extern "C" fn clock_duration_eq(duration: ClockHandle, other: ClockHandle) -> bool {
    let pair = handle::with(duration, |d: &Duration| *d)
        .and_then(|a| handle::with(other, |b: &Duration| a == *b));
    value_or("clock_duration_eq", pair, false)
}

/// Format a duration as `MM:SS.mmm`
/// Returns a string that must be freed with clock_free_string, or NULL on error
#[no_mangle]
pub extern "C" fn clock_format_time(duration: ClockHandle) -> *mut c_char {
    let text = match handle::with(duration, |d: &Duration| format_time(*d)) {
        Ok(text) => text,
        Err(err) => {
            record_error("clock_format_time", &err);
            return ptr::null_mut();
        }
    };
    match CString::new(text) {
        Ok(s) => s.into_raw(),
        Err(_) => {
            set_last_error("clock_format_time: interior NUL");
            ptr::null_mut()
        }
    }
}
