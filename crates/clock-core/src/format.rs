//! Human-readable rendering of durations
//!
//! The layout is `MM:SS.mmm`: minutes are zero-padded to two digits and keep
//! growing past an hour, seconds are two digits, and the fraction is
//! truncated to milliseconds. Host wrappers display this string verbatim.

use std::fmt;

use crate::Duration;

/// Canonical rendering of [`Duration::ZERO`]
pub const ZERO_TEXT: &str = "00:00.000";

/// Format a duration as `MM:SS.mmm`
pub fn format_time(duration: Duration) -> String {
    duration.to_string()
}

pub(crate) fn write_clock(f: &mut fmt::Formatter<'_>, duration: Duration) -> fmt::Result {
    let secs = duration.as_secs();
    write!(
        f,
        "{:02}:{:02}.{:03}",
        secs / 60,
        secs % 60,
        duration.subsec_millis()
    )
}
