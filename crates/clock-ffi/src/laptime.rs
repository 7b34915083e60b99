//! FFI LapTime functions

use std::ffi::c_int;

use clock_core::{Duration, LapTime};

use crate::error::*;
use crate::handle;
use crate::types::ClockHandle;

/// Free a single lap handle
/// Laps obtained from a lap buffer are freed by clock_lap_buffer_free instead
#[no_mangle]
pub extern "C" fn clock_laptime_free(laptime: ClockHandle) -> c_int {
    result_to_int("clock_laptime_free", handle::release::<LapTime>(laptime))
}

/// 1-based lap number. Returns 0 on error.
#[no_mangle]
pub extern "C" fn clock_laptime_lap_number(laptime: ClockHandle) -> u32 {
    value_or(
        "clock_laptime_lap_number",
        handle::with(laptime, |lap: &LapTime| lap.lap_number()),
        0,
    )
}

/// Time since the previous lap as a new duration handle
#[no_mangle]
pub extern "C" fn clock_laptime_split_time(laptime: ClockHandle) -> ClockHandle {
    let result = handle::with(laptime, |lap: &LapTime| lap.split_time())
        .and_then(handle::register::<Duration>);
    handle_or_null("clock_laptime_split_time", result)
}

/// Time since start as a new duration handle
#[no_mangle]
pub extern "C" fn clock_laptime_total_time(laptime: ClockHandle) -> ClockHandle {
    let result = handle::with(laptime, |lap: &LapTime| lap.total_time())
        .and_then(handle::register::<Duration>);
    handle_or_null("clock_laptime_total_time", result)
}
