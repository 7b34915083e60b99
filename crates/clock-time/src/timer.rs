//! Countdown timer
//!
//! Completion is a derived predicate, not an event: a timer is done when
//! its elapsed time has reached the target at the moment it is queried.
//! There is no background thread.

use std::fmt;

use clock_core::Duration;
use tracing::trace;

use crate::{RunState, SystemClock, TimeSource};

/// Observable phase of a [`Timer`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerPhase {
    /// Never started since creation or the last reset
    NotStarted,
    /// Counting down
    Running,
    /// Stopped before reaching the target
    Paused,
    /// Elapsed time has reached the target
    Done,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerPhase::NotStarted => "not started",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Countdown toward a fixed target duration
///
/// Two timers compare equal when their targets are equal; run state and
/// elapsed time are not part of equality.
#[derive(Clone, Debug)]
pub struct Timer<S: TimeSource = SystemClock> {
    target: Duration,
    state: RunState,
    source: S,
}

impl Timer {
    pub fn new(target: Duration) -> Self {
        Self::with_source(target, SystemClock)
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl<S: TimeSource> Timer<S> {
    pub fn with_source(target: Duration, source: S) -> Self {
        Timer {
            target,
            state: RunState::Idle,
            source,
        }
    }

    /// Begin or resume the countdown. No effect if already running.
    pub fn start(&mut self) {
        if self.state.start(self.source.now()) {
            trace!(duration = ?self.target, remaining = ?self.remaining(), "timer started");
        }
    }

    /// Pause the countdown. No effect if already stopped.
    pub fn stop(&mut self) {
        if self.state.stop(self.source.now()) {
            trace!(remaining = ?self.remaining(), "timer stopped");
        }
    }

    /// Return to not-started; the target is kept
    pub fn reset(&mut self) {
        self.state.reset();
        trace!(duration = ?self.target, "timer reset");
    }

    /// Raw elapsed time. May exceed the target; use [`Timer::is_done`] for completion.
    pub fn elapsed(&self) -> Duration {
        self.state.elapsed(self.source.now())
    }

    /// Time left until the target, never below zero
    pub fn remaining(&self) -> Duration {
        self.target - self.elapsed()
    }

    /// The fixed target
    #[inline]
    pub fn duration(&self) -> Duration {
        self.target
    }

    /// Started at least once and elapsed has reached the target
    pub fn is_done(&self) -> bool {
        !self.state.is_idle() && self.elapsed() >= self.target
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    #[inline]
    pub fn has_not_started(&self) -> bool {
        self.state.is_idle()
    }

    pub fn phase(&self) -> TimerPhase {
        if self.state.is_idle() {
            TimerPhase::NotStarted
        } else if self.is_done() {
            TimerPhase::Done
        } else if self.state.is_running() {
            TimerPhase::Running
        } else {
            TimerPhase::Paused
        }
    }
}

impl<S: TimeSource, T: TimeSource> PartialEq<Timer<T>> for Timer<S> {
    fn eq(&self, other: &Timer<T>) -> bool {
        self.target == other.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;

    fn manual(secs: u64) -> (ManualClock, Timer<ManualClock>) {
        let clock = ManualClock::new();
        let timer = Timer::with_source(Duration::from_secs(secs), clock.clone());
        (clock, timer)
    }

    #[test]
    fn test_new_timer() {
        let timer = Timer::from_secs(10);
        assert!(timer.elapsed().is_zero());
        assert_eq!(timer.duration(), Duration::from_secs(10));
        assert_eq!(timer.remaining(), Duration::from_secs(10));
        assert!(timer.has_not_started());
        assert!(!timer.is_running());
        assert!(!timer.is_done());
        assert_eq!(timer.phase(), TimerPhase::NotStarted);
    }

    #[test]
    fn test_start_and_stop_timer() {
        let (clock, mut timer) = manual(2);

        timer.start();
        assert!(timer.is_running());
        assert!(!timer.has_not_started());
        clock.advance(Duration::from_secs(1));
        timer.stop();

        assert_eq!(timer.elapsed(), Duration::from_secs(1));
        assert_eq!(timer.remaining(), Duration::from_secs(1));
        assert_eq!(timer.phase(), TimerPhase::Paused);

        clock.advance(Duration::from_secs(30));
        assert!(!timer.is_done());
    }

    #[test]
    fn test_resume_counts_down_remaining() {
        let (clock, mut timer) = manual(10);

        timer.start();
        clock.advance(Duration::from_secs(3));
        timer.stop();
        clock.advance(Duration::from_secs(100));
        timer.start();
        clock.advance(Duration::from_secs(2));

        assert_eq!(timer.remaining(), Duration::from_secs(5));
    }

    #[test]
    fn test_is_done() {
        let (clock, mut timer) = manual(5);

        timer.start();
        clock.advance(Duration::from_millis(4_999));
        assert!(!timer.is_done());

        clock.advance(Duration::from_millis(1));
        assert!(timer.is_done());
        assert!(timer.remaining().is_zero());
        assert_eq!(timer.phase(), TimerPhase::Done);
    }

    #[test]
    fn test_elapsed_may_exceed_target() {
        let (clock, mut timer) = manual(1);

        timer.start();
        clock.advance(Duration::from_secs(3));

        assert_eq!(timer.elapsed(), Duration::from_secs(3));
        assert!(timer.remaining().is_zero());
        assert!(timer.is_done());
    }

    #[test]
    fn test_zero_target_done_only_after_start() {
        let (_clock, mut timer) = manual(0);
        assert!(!timer.is_done());
        assert!(timer.has_not_started());

        timer.start();
        assert!(timer.is_done());
    }

    #[test]
    fn test_reset_timer() {
        let (clock, mut timer) = manual(2);

        timer.start();
        clock.advance(Duration::from_secs(5));
        assert!(timer.is_done());
        timer.reset();

        assert!(timer.elapsed().is_zero());
        assert_eq!(timer.remaining(), Duration::from_secs(2));
        assert_eq!(timer.duration(), Duration::from_secs(2));
        assert!(timer.has_not_started());
        assert!(!timer.is_done());
        assert!(!timer.is_running());
    }

    #[test]
    fn test_equality_compares_targets() {
        let (clock, mut running) = manual(5);
        running.start();
        clock.advance(Duration::from_secs(2));

        assert!(running == Timer::from_secs(5));
        assert!(running != Timer::from_secs(6));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(TimerPhase::NotStarted.to_string(), "not started");
        assert_eq!(TimerPhase::Done.to_string(), "done");
    }
}
