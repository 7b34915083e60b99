//! Clock Time Engine - Stopwatch and countdown timer
//!
//! This crate implements the stateful side of the clock:
//! - Monotonic time sources (OS clock, manual clock)
//! - Shared run state with banked segments
//! - Stopwatch with ordered lap history
//! - Countdown timer with lazily observed completion

pub mod config;
pub mod run;
pub mod source;
pub mod stopwatch;
pub mod timer;

pub use config::*;
pub use run::*;
pub use source::*;
pub use stopwatch::*;
pub use timer::*;

pub use clock_core::{format_time, Duration, LapTime};
