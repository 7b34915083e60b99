#![allow(clippy::missing_safety_doc)]
//! FFI Stopwatch functions

use std::ffi::c_int;

use clock_core::{Duration, LapTime};
use clock_time::Stopwatch;
use tracing::debug;

use crate::error::*;
use crate::handle;
use crate::types::{ClockHandle, ClockLapBuffer};

/// Create a new stopwatch
/// Returns a handle that must be freed with clock_stopwatch_free
#[no_mangle]
pub extern "C" fn clock_stopwatch_create() -> ClockHandle {
    handle_or_null("clock_stopwatch_create", handle::register(Stopwatch::new()))
}

/// Free a stopwatch handle
#[no_mangle]
pub extern "C" fn clock_stopwatch_free(stopwatch: ClockHandle) -> c_int {
    result_to_int(
        "clock_stopwatch_free",
        handle::release::<Stopwatch>(stopwatch),
    )
}

#[no_mangle]
pub extern "C" fn clock_stopwatch_start(stopwatch: ClockHandle) -> c_int {
    result_to_int(
        "clock_stopwatch_start",
        handle::with_mut(stopwatch, |s: &mut Stopwatch| s.start()),
    )
}

#[no_mangle]
pub extern "C" fn clock_stopwatch_stop(stopwatch: ClockHandle) -> c_int {
    result_to_int(
        "clock_stopwatch_stop",
        handle::with_mut(stopwatch, |s: &mut Stopwatch| s.stop()),
    )
}

#[no_mangle]
pub extern "C" fn clock_stopwatch_reset(stopwatch: ClockHandle) -> c_int {
    result_to_int(
        "clock_stopwatch_reset",
        handle::with_mut(stopwatch, |s: &mut Stopwatch| s.reset()),
    )
}

/// Record a lap at the current elapsed time
/// Returns 0 when a lap was recorded. NotStarted or LapLimit means nothing
/// was recorded; other negative codes are handle errors.
#[no_mangle]
pub extern "C" fn clock_stopwatch_add_lap(stopwatch: ClockHandle) -> c_int {
    let result = handle::with_mut(stopwatch, |s: &mut Stopwatch| match s.add_lap() {
        Some(lap) => Ok(lap),
        None if !s.has_started() => Err(HandleError::NotStarted),
        None => Err(HandleError::LapLimit(s.lap_count())),
    })
    .and_then(|lap| lap);
    result_to_int("clock_stopwatch_add_lap", result)
}

#[no_mangle]
pub extern "C" fn clock_stopwatch_is_running(stopwatch: ClockHandle) -> bool {
    value_or(
        "clock_stopwatch_is_running",
        handle::with(stopwatch, |s: &Stopwatch| s.is_running()),
        false,
    )
}

/// Elapsed time as a new duration handle
/// Returns a handle that must be freed with clock_duration_free
#[no_mangle]
pub extern "C" fn clock_stopwatch_elapsed_time(stopwatch: ClockHandle) -> ClockHandle {
    let result = handle::with(stopwatch, |s: &Stopwatch| s.elapsed_time())
        .and_then(handle::register::<Duration>);
    handle_or_null("clock_stopwatch_elapsed_time", result)
}

/// Snapshot the recorded laps
/// Every lap gets its own handle; free them all with clock_lap_buffer_free
#[no_mangle]
pub extern "C" fn clock_stopwatch_lap_times(stopwatch: ClockHandle) -> ClockLapBuffer {
    let laps = match handle::with(stopwatch, |s: &Stopwatch| s.lap_times()) {
        Ok(laps) => laps,
        Err(err) => {
            record_error("clock_stopwatch_lap_times", &err);
            return ClockLapBuffer::empty();
        }
    };

    let mut handles = Vec::with_capacity(laps.len());
    for lap in laps {
        match handle::register(lap) {
            Ok(h) => handles.push(h),
            Err(err) => {
                record_error("clock_stopwatch_lap_times", &err);
                for h in handles {
                    if let Err(err) = handle::release::<LapTime>(h) {
                        debug!(error = %err, "lap rollback failed");
                    }
                }
                return ClockLapBuffer::empty();
            }
        }
    }
    ClockLapBuffer::from_vec(handles)
}

/// Get the lap handle at `index` in a buffer
/// The handle stays owned by the buffer; do not free it separately
#[no_mangle]
pub unsafe extern "C" fn clock_lap_buffer_get(
    buf: *const ClockLapBuffer,
    index: usize,
) -> ClockHandle {
    if buf.is_null() {
        record_error("clock_lap_buffer_get", &HandleError::Null);
        return ClockHandle::NULL;
    }

    let buf = &*buf;
    if buf.is_empty() || index >= buf.len {
        record_error(
            "clock_lap_buffer_get",
            &HandleError::OutOfRange {
                index,
                len: buf.len,
            },
        );
        return ClockHandle::NULL;
    }
    *buf.data.add(index)
}

/// Free a lap buffer and every lap handle in it
/// Returns 0 if every lap was released, otherwise the first error
#[no_mangle]
pub unsafe extern "C" fn clock_lap_buffer_free(buf: ClockLapBuffer) -> c_int {
    let mut status: c_int = ClockErrorCode::Ok.into();
    let handles = buf.into_vec();
    debug!(laps = handles.len(), "releasing lap buffer");
    for h in handles {
        let code = result_to_int("clock_lap_buffer_free", handle::release::<LapTime>(h));
        if status == 0 {
            status = code;
        }
    }
    status
}
