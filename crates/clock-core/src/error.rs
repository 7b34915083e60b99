//! Error types for the clock engine

use thiserror::Error;

/// Core clock errors
///
/// Stopwatch and timer operations are total; only conversions from
/// untrusted floating-point input can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ClockError {
    #[error("Negative duration: {0}s")]
    Negative(f64),

    #[error("Duration is not finite: {0}")]
    NotFinite(f64),

    #[error("Duration overflow: {0}s does not fit")]
    Overflow(f64),
}

/// Result type for clock operations
pub type ClockResult<T> = Result<T, ClockError>;
