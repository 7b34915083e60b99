//! FFI Error handling

use std::ffi::{c_char, c_int, CString};

use clock_core::ClockError;
use thiserror::Error;
use tracing::warn;

use crate::handle::ObjectKind;
use crate::types::ClockHandle;

/// Error codes for FFI functions
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockErrorCode {
    /// Success
    Ok = 0,
    /// Null handle
    NullHandle = -1,
    /// Handle was never issued
    UnknownHandle = -2,
    /// Handle was already freed
    StaleHandle = -3,
    /// Handle refers to another kind of object
    WrongKind = -4,
    /// Index outside a buffer
    IndexOutOfRange = -5,
    /// Invalid argument
    InvalidArgument = -6,
    /// Handle table is full
    OutOfHandles = -7,
    /// Stopwatch has not been started since creation or reset
    NotStarted = -8,
    /// Stopwatch lap limit reached
    LapLimit = -9,
    /// Internal error
    InternalError = -99,
}

impl From<ClockErrorCode> for c_int {
    fn from(code: ClockErrorCode) -> Self {
        code as c_int
    }
}

/// Failures reported across the boundary
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum HandleError {
    #[error("Null handle")]
    Null,

    #[error("Unknown handle: slot {0}")]
    Unknown(u32),

    #[error("Stale handle: slot {index} generation {generation}")]
    Stale { index: u32, generation: u32 },

    #[error("Wrong handle kind: expected {expected}, found {found}")]
    WrongKind {
        expected: ObjectKind,
        found: ObjectKind,
    },

    #[error("Index {index} out of range for {len} laps")]
    OutOfRange { index: usize, len: usize },

    #[error("Handle table exhausted")]
    Exhausted,

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ClockError),

    #[error("Stopwatch not started, no lap recorded")]
    NotStarted,

    #[error("Lap limit of {0} reached, no lap recorded")]
    LapLimit(usize),
}

impl HandleError {
    pub fn code(&self) -> ClockErrorCode {
        match self {
            HandleError::Null => ClockErrorCode::NullHandle,
            HandleError::Unknown(_) => ClockErrorCode::UnknownHandle,
            HandleError::Stale { .. } => ClockErrorCode::StaleHandle,
            HandleError::WrongKind { .. } => ClockErrorCode::WrongKind,
            HandleError::OutOfRange { .. } => ClockErrorCode::IndexOutOfRange,
            HandleError::Exhausted => ClockErrorCode::OutOfHandles,
            HandleError::InvalidArgument(_) => ClockErrorCode::InvalidArgument,
            HandleError::NotStarted => ClockErrorCode::NotStarted,
            HandleError::LapLimit(_) => ClockErrorCode::LapLimit,
        }
    }
}

thread_local! {
    static LAST_ERROR: std::cell::RefCell<Option<CString>> =
        const { std::cell::RefCell::new(None) };
}

/// Set the last error message
pub fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Get the last error message
/// Returns NULL if no error
#[no_mangle]
pub extern "C" fn clock_get_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(s) => s.as_ptr(),
        None => std::ptr::null(),
    })
}

/// Clear the last error
#[no_mangle]
pub extern "C" fn clock_clear_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Result type for FFI functions
pub type ClockFfiResult<T> = Result<T, HandleError>;

/// Log a rejected call and remember it as the last error
pub fn record_error(op: &str, err: &HandleError) -> ClockErrorCode {
    warn!(op, error = %err, "clock call rejected");
    set_last_error(&format!("{op}: {err}"));
    err.code()
}

/// Convert a result to a C status code, recording any error
pub fn result_to_int<T>(op: &str, result: ClockFfiResult<T>) -> c_int {
    match result {
        Ok(_) => ClockErrorCode::Ok.into(),
        Err(err) => record_error(op, &err).into(),
    }
}

/// Unwrap a handle result, recording any error and yielding the null handle
pub fn handle_or_null(op: &str, result: ClockFfiResult<ClockHandle>) -> ClockHandle {
    value_or(op, result, ClockHandle::NULL)
}

/// Unwrap a result, recording any error and yielding `fallback`
pub fn value_or<T>(op: &str, result: ClockFfiResult<T>, fallback: T) -> T {
    result.unwrap_or_else(|err| {
        record_error(op, &err);
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_last_error_roundtrip() {
        clock_clear_error();
        assert!(clock_get_last_error().is_null());

        let code = record_error("clock_test", &HandleError::Null);
        assert_eq!(code, ClockErrorCode::NullHandle);

        let msg = unsafe { CStr::from_ptr(clock_get_last_error()) };
        assert_eq!(msg.to_str().unwrap(), "clock_test: Null handle");

        clock_clear_error();
        assert!(clock_get_last_error().is_null());
    }

    #[test]
    fn test_result_to_int() {
        assert_eq!(result_to_int("ok", Ok(())), 0);
        assert_eq!(
            result_to_int::<()>(
                "stale",
                Err(HandleError::Stale {
                    index: 1,
                    generation: 2
                })
            ),
            ClockErrorCode::StaleHandle as c_int
        );
    }

    #[test]
    fn test_wrong_kind_message() {
        let err = HandleError::WrongKind {
            expected: ObjectKind::Timer,
            found: ObjectKind::Stopwatch,
        };
        assert_eq!(
            err.to_string(),
            "Wrong handle kind: expected timer, found stopwatch"
        );
        assert_eq!(err.code(), ClockErrorCode::WrongKind);
    }

    #[test]
    fn test_clock_error_is_invalid_argument() {
        let err = HandleError::from(ClockError::Negative(-1.5));
        assert_eq!(err.code(), ClockErrorCode::InvalidArgument);
        assert_eq!(err.to_string(), "Invalid argument: Negative duration: -1.5s");
    }
}
