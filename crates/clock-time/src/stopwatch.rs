//! Stopwatch - elapsed time with ordered lap history

use clock_core::{Duration, LapTime};
use tracing::{debug, trace};

use crate::{ClockConfig, RunState, SystemClock, TimeSource};

/// Elapsed-time tracker that can be paused, resumed and lapped
///
/// Laps are recorded against the running total, so `split_time` of lap `n`
/// is always `total_time(n) - total_time(n - 1)`.
#[derive(Clone, Debug)]
pub struct Stopwatch<S: TimeSource = SystemClock> {
    state: RunState,
    laps: Vec<LapTime>,
    config: ClockConfig,
    source: S,
}

impl Stopwatch {
    /// Create a stopped stopwatch on the OS monotonic clock
    pub fn new() -> Self {
        Self::with_config(ClockConfig::default())
    }

    pub fn with_config(config: ClockConfig) -> Self {
        Self::with_config_and_source(config, SystemClock)
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TimeSource> Stopwatch<S> {
    pub fn with_source(source: S) -> Self {
        Self::with_config_and_source(ClockConfig::default(), source)
    }

    pub fn with_config_and_source(config: ClockConfig, source: S) -> Self {
        Stopwatch {
            state: RunState::Idle,
            laps: Vec::with_capacity(config.lap_capacity),
            config,
            source,
        }
    }

    /// Start or resume timing. No effect if already running.
    pub fn start(&mut self) {
        if self.state.start(self.source.now()) {
            trace!(banked = ?self.elapsed_time(), "stopwatch started");
        }
    }

    /// Pause timing, banking the current segment. No effect if stopped.
    pub fn stop(&mut self) {
        if self.state.stop(self.source.now()) {
            trace!(elapsed = ?self.elapsed_time(), "stopwatch stopped");
        }
    }

    /// Zero the stopwatch and clear its laps, whatever the current state
    pub fn reset(&mut self) {
        self.state.reset();
        self.laps.clear();
        trace!("stopwatch reset");
    }

    /// Record a lap at the current elapsed time.
    ///
    /// Returns the recorded lap, or `None` when the stopwatch has not been
    /// started since creation or reset, or the lap limit is reached.
    /// Timing is not interrupted.
    pub fn add_lap(&mut self) -> Option<LapTime> {
        if self.state.is_idle() {
            trace!("lap ignored, stopwatch never started");
            return None;
        }
        if !self.config.accepts_lap(self.laps.len()) {
            debug!(max_laps = ?self.config.max_laps, "lap limit reached");
            return None;
        }

        let lap = LapTime::following(self.laps.last(), self.elapsed_time());
        self.laps.push(lap);
        trace!(
            lap = lap.lap_number(),
            split = ?lap.split_time(),
            total = ?lap.total_time(),
            "lap recorded"
        );
        Some(lap)
    }

    /// Banked time plus the live segment while running
    pub fn elapsed_time(&self) -> Duration {
        self.state.elapsed(self.source.now())
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Started at least once since creation or the last reset
    #[inline]
    pub fn has_started(&self) -> bool {
        !self.state.is_idle()
    }

    /// Snapshot of the laps in recording order
    pub fn lap_times(&self) -> Vec<LapTime> {
        self.laps.clone()
    }

    #[inline]
    pub fn laps(&self) -> &[LapTime] {
        &self.laps
    }

    /// Look up a lap by its 1-based number
    pub fn lap(&self, lap_number: u32) -> Option<LapTime> {
        let index = usize::try_from(lap_number.checked_sub(1)?).ok()?;
        self.laps.get(index).copied()
    }

    pub fn last_lap(&self) -> Option<LapTime> {
        self.laps.last().copied()
    }

    #[inline]
    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }

    #[inline]
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;

    fn manual() -> (ManualClock, Stopwatch<ManualClock>) {
        let clock = ManualClock::new();
        let stopwatch = Stopwatch::with_source(clock.clone());
        (clock, stopwatch)
    }

    #[test]
    fn test_stopwatch_new() {
        let stopwatch = Stopwatch::new();
        assert!(!stopwatch.is_running());
        assert!(stopwatch.elapsed_time().is_zero());
        assert!(stopwatch.lap_times().is_empty());
    }

    #[test]
    fn test_stopwatch_start_stop() {
        let (clock, mut stopwatch) = manual();

        stopwatch.start();
        assert!(stopwatch.is_running());
        clock.advance(Duration::from_secs(1));
        stopwatch.stop();

        assert!(!stopwatch.is_running());
        assert_eq!(stopwatch.elapsed_time(), Duration::from_secs(1));

        // Time while stopped does not count
        clock.advance(Duration::from_secs(10));
        assert_eq!(stopwatch.elapsed_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_stopwatch_resume_accumulates() {
        let (clock, mut stopwatch) = manual();

        stopwatch.start();
        clock.advance(Duration::from_millis(400));
        stopwatch.stop();
        clock.advance(Duration::from_secs(3));
        stopwatch.start();
        clock.advance(Duration::from_millis(600));

        assert_eq!(stopwatch.elapsed_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_stopwatch_start_is_idempotent() {
        let (clock, mut stopwatch) = manual();

        stopwatch.start();
        clock.advance(Duration::from_millis(500));
        stopwatch.start();
        clock.advance(Duration::from_millis(500));

        assert_eq!(stopwatch.elapsed_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_stopwatch_laps() {
        let (clock, mut stopwatch) = manual();

        stopwatch.start();
        clock.advance(Duration::from_secs(1));
        stopwatch.add_lap();
        clock.advance(Duration::from_secs(1));
        stopwatch.add_lap();
        stopwatch.stop();

        let laps = stopwatch.lap_times();
        assert_eq!(laps.len(), 2);
        assert_eq!(laps[0].lap_number(), 1);
        assert_eq!(laps[0].total_time(), Duration::from_secs(1));
        assert_eq!(laps[1].lap_number(), 2);
        assert_eq!(laps[1].total_time(), Duration::from_secs(2));
        assert_eq!(laps[1].split_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_stopwatch_lap_does_not_interrupt() {
        let (clock, mut stopwatch) = manual();

        stopwatch.start();
        clock.advance(Duration::from_millis(700));
        stopwatch.add_lap();
        assert!(stopwatch.is_running());
        clock.advance(Duration::from_millis(300));

        assert_eq!(stopwatch.elapsed_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_stopwatch_lap_while_stopped() {
        let (clock, mut stopwatch) = manual();

        stopwatch.start();
        clock.advance(Duration::from_secs(2));
        stopwatch.stop();
        clock.advance(Duration::from_secs(5));

        let lap = stopwatch.add_lap().map(|lap| lap.total_time());
        assert_eq!(lap, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_stopwatch_lap_before_start_is_ignored() {
        let (_clock, mut stopwatch) = manual();
        assert!(!stopwatch.has_started());
        assert_eq!(stopwatch.add_lap(), None);
        assert_eq!(stopwatch.lap_count(), 0);

        stopwatch.start();
        stopwatch.stop();
        assert!(stopwatch.has_started());
        stopwatch.reset();
        assert!(!stopwatch.has_started());
    }

    #[test]
    fn test_stopwatch_lap_limit() {
        let clock = ManualClock::new();
        let config = ClockConfig {
            lap_capacity: 2,
            max_laps: Some(2),
        };
        let mut stopwatch = Stopwatch::with_config_and_source(config, clock.clone());

        stopwatch.start();
        for _ in 0..5 {
            clock.advance(Duration::from_millis(100));
            stopwatch.add_lap();
        }

        assert_eq!(stopwatch.lap_count(), 2);
        assert_eq!(
            stopwatch.last_lap().map(|lap| lap.total_time()),
            Some(Duration::from_millis(200))
        );
    }

    #[test]
    fn test_stopwatch_lap_lookup() {
        let (clock, mut stopwatch) = manual();
        stopwatch.start();
        clock.advance(Duration::from_millis(250));
        stopwatch.add_lap();

        assert_eq!(stopwatch.lap(0), None);
        assert_eq!(stopwatch.lap(2), None);
        assert_eq!(
            stopwatch.lap(1).map(|lap| lap.split_time()),
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_stopwatch_snapshot_is_independent() {
        let (clock, mut stopwatch) = manual();
        stopwatch.start();
        clock.advance(Duration::from_secs(1));
        stopwatch.add_lap();

        let before = stopwatch.lap_times();
        stopwatch.add_lap();

        assert_eq!(before.len(), 1);
        assert_eq!(stopwatch.lap_times().len(), 2);
        assert_eq!(&stopwatch.lap_times()[..1], &before[..]);
    }

    #[test]
    fn test_stopwatch_reset() {
        let (clock, mut stopwatch) = manual();

        stopwatch.start();
        clock.advance(Duration::from_secs(1));
        stopwatch.add_lap();
        stopwatch.reset();

        assert!(!stopwatch.is_running());
        assert!(stopwatch.elapsed_time().is_zero());
        assert!(stopwatch.lap_times().is_empty());

        // A fresh run numbers laps from 1 again
        stopwatch.start();
        clock.advance(Duration::from_millis(10));
        assert_eq!(stopwatch.add_lap().map(|lap| lap.lap_number()), Some(1));
    }
}
