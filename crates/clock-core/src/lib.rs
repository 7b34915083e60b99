//! Clock Core - Fundamental timekeeping types
//!
//! This crate defines the value types shared by the clock engine:
//! - Duration (non-negative time span, seconds + nanoseconds)
//! - LapTime (numbered split/total record)
//! - Time formatting (`MM:SS.mmm`)

pub mod duration;
pub mod error;
pub mod format;
pub mod lap;

pub use duration::*;
pub use error::*;
pub use format::*;
pub use lap::*;
