//! Run state shared by the stopwatch and the timer
//!
//! Elapsed time is never re-derived from a single start instant. Each
//! completed segment is banked when the clock stops, and the live segment is
//! added on top while running. This keeps elapsed time monotonic across any
//! number of start/stop cycles.

use std::time::Instant;

use clock_core::Duration;

/// Accumulating run state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    /// Never started since creation or the last reset
    #[default]
    Idle,
    /// Live segment began at `since`; `banked` holds earlier segments
    Running { since: Instant, banked: Duration },
    /// Paused with `banked` elapsed
    Stopped { banked: Duration },
}

impl RunState {
    /// Begin or resume a segment. Returns false if already running.
    pub fn start(&mut self, now: Instant) -> bool {
        let banked = match *self {
            RunState::Running { .. } => return false,
            RunState::Idle => Duration::ZERO,
            RunState::Stopped { banked } => banked,
        };
        *self = RunState::Running { since: now, banked };
        true
    }

    /// Fold the live segment into the bank. Returns false if not running.
    pub fn stop(&mut self, now: Instant) -> bool {
        match *self {
            RunState::Running { since, banked } => {
                *self = RunState::Stopped {
                    banked: banked + segment(since, now),
                };
                true
            }
            RunState::Idle | RunState::Stopped { .. } => false,
        }
    }

    pub fn reset(&mut self) {
        *self = RunState::Idle;
    }

    /// Banked time plus the live segment, if any
    pub fn elapsed(&self, now: Instant) -> Duration {
        match *self {
            RunState::Idle => Duration::ZERO,
            RunState::Running { since, banked } => banked + segment(since, now),
            RunState::Stopped { banked } => banked,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running { .. })
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, RunState::Idle)
    }
}

#[inline]
fn segment(since: Instant, now: Instant) -> Duration {
    now.saturating_duration_since(since).into()
}
