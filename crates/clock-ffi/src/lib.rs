#![allow(clippy::missing_safety_doc)]
//! Clock FFI - Foreign Function Interface
//!
//! C-compatible bindings for the stopwatch and timer engine.
//! Objects live in a generation-checked handle table; callers hold
//! `ClockHandle` values and release each one exactly once.

pub mod duration;
pub mod error;
pub mod handle;
pub mod laptime;
pub mod stopwatch;
pub mod timer;
pub mod types;

use std::ffi::{c_char, c_int, CString};

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

pub use duration::*;
pub use error::*;
pub use laptime::*;
pub use stopwatch::*;
pub use timer::*;
pub use types::*;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "CLOCK_LOG";

/// Library version
#[no_mangle]
pub extern "C" fn clock_version() -> *const c_char {
    static VERSION: &[u8] = b"0.2.0\0";
    VERSION.as_ptr() as *const c_char
}

/// Initialize the clock library
/// Installs a stderr log subscriber filtered by CLOCK_LOG (default "warn").
/// Safe to call more than once. Returns 0.
#[no_mangle]
pub extern "C" fn clock_init() -> c_int {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    debug!(installed, "clock library initialized");
    ClockErrorCode::Ok.into()
}

/// Shutdown the clock library
/// Reports handles that were never freed
#[no_mangle]
pub extern "C" fn clock_shutdown() {
    let live = handle::live_handles();
    if live > 0 {
        warn!(live, "clock handles still live at shutdown");
    }
}

/// Number of handles currently allocated
#[no_mangle]
pub extern "C" fn clock_live_handles() -> usize {
    handle::live_handles()
}

/// Free a string allocated by the clock library
#[no_mangle]
pub unsafe extern "C" fn clock_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
