//! FFI Timer functions

use std::ffi::c_int;

use clock_core::Duration;
use clock_time::Timer;

use crate::error::*;
use crate::handle;
use crate::types::ClockHandle;

/// Create a countdown timer of `secs` seconds
/// Returns a handle that must be freed with clock_timer_free
#[no_mangle]
pub extern "C" fn clock_timer_create(secs: u64) -> ClockHandle {
    handle_or_null("clock_timer_create", handle::register(Timer::from_secs(secs)))
}

/// Free a timer handle
#[no_mangle]
pub extern "C" fn clock_timer_free(timer: ClockHandle) -> c_int {
    result_to_int("clock_timer_free", handle::release::<Timer>(timer))
}

#[no_mangle]
pub extern "C" fn clock_timer_start(timer: ClockHandle) -> c_int {
    result_to_int(
        "clock_timer_start",
        handle::with_mut(timer, |t: &mut Timer| t.start()),
    )
}

#[no_mangle]
pub extern "C" fn clock_timer_stop(timer: ClockHandle) -> c_int {
    result_to_int(
        "clock_timer_stop",
        handle::with_mut(timer, |t: &mut Timer| t.stop()),
    )
}

#[no_mangle]
pub extern "C" fn clock_timer_reset(timer: ClockHandle) -> c_int {
    result_to_int(
        "clock_timer_reset",
        handle::with_mut(timer, |t: &mut Timer| t.reset()),
    )
}

fn duration_handle(op: &str, timer: ClockHandle, f: impl FnOnce(&Timer) -> Duration) -> ClockHandle {
    let result = handle::with(timer, f).and_then(handle::register::<Duration>);
    handle_or_null(op, result)
}

/// Elapsed time as a new duration handle
#[no_mangle]
pub extern "C" fn clock_timer_elapsed(timer: ClockHandle) -> ClockHandle {
    duration_handle("clock_timer_elapsed", timer, Timer::elapsed)
}

/// Remaining time as a new duration handle (never negative)
#[no_mangle]
pub extern "C" fn clock_timer_remaining(timer: ClockHandle) -> ClockHandle {
    duration_handle("clock_timer_remaining", timer, Timer::remaining)
}

/// Target duration as a new duration handle
#[no_mangle]
pub extern "C" fn clock_timer_duration(timer: ClockHandle) -> ClockHandle {
    duration_handle("clock_timer_duration", timer, Timer::duration)
}

#[no_mangle]
pub extern "C" fn clock_timer_is_running(timer: ClockHandle) -> bool {
    value_or(
        "clock_timer_is_running",
        handle::with(timer, |t: &Timer| t.is_running()),
        false,
    )
}

#[no_mangle]
pub extern "C" fn clock_timer_is_done(timer: ClockHandle) -> bool {
    value_or(
        "clock_timer_is_done",
        handle::with(timer, |t: &Timer| t.is_done()),
        false,
    )
}

#[no_mangle]
pub extern "C" fn clock_timer_has_not_started(timer: ClockHandle) -> bool {
    value_or(
        "clock_timer_has_not_started",
        handle::with(timer, |t: &Timer| t.has_not_started()),
        false,
    )
}

/// Timers are equal when their target durations are equal
#[no_mangle]
pub extern "C" fn clock_timer_eq(timer: ClockHandle, other: ClockHandle) -> bool {
    let pair = handle::with(timer, |t: &Timer| t.clone())
        .and_then(|a| handle::with(other, |b: &Timer| a == *b));
    value_or("clock_timer_eq", pair, false)
}
