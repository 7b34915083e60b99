//! Monotonic time sources

use std::sync::Arc;
use std::time::Instant;

use clock_core::Duration;
use parking_lot::Mutex;
use tracing::trace;

/// Source of monotonic instants
/// INVARIANT: successive calls to `now` MUST never go backwards
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// OS monotonic clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic tests and simulations.
///
/// Clones share the same timeline, so a test can keep one handle and give
/// another to the stopwatch or timer under test.
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    current: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        let origin = Instant::now();
        ManualClock {
            origin,
            current: Arc::new(Mutex::new(origin)),
        }
    }

    /// Move the clock forward.
    ///
    /// A step past the largest representable instant leaves the clock where it is.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock();
        match current.checked_add(by.into()) {
            Some(next) => *current = next,
            None => trace!(by = ?by, "manual clock step out of range"),
        }
    }

    /// Total time advanced since creation
    pub fn elapsed(&self) -> Duration {
        self.current.lock().duration_since(self.origin).into()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }
}
