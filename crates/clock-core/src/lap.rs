//! Lap records produced by a stopwatch

use crate::Duration;

/// A caller-marked checkpoint in a stopwatch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LapTime {
    lap_number: u32,
    split_time: Duration,
    total_time: Duration,
}

impl LapTime {
    #[inline]
    pub fn new(lap_number: u32, split_time: Duration, total_time: Duration) -> Self {
        LapTime {
            lap_number,
            split_time,
            total_time,
        }
    }

    /// Record the lap that follows `previous` at `total_time` since start.
    ///
    /// The first lap (no previous) splits from zero. A total earlier than the
    /// previous one yields a zero split.
    pub fn following(previous: Option<&LapTime>, total_time: Duration) -> Self {
        let (number, last_total) = match previous {
            Some(lap) => (lap.lap_number.saturating_add(1), lap.total_time),
            None => (1, Duration::ZERO),
        };
        LapTime::new(number, total_time - last_total, total_time)
    }

    /// 1-based index within the run
    #[inline]
    pub fn lap_number(&self) -> u32 {
        self.lap_number
    }

    /// Time since the previous lap, or since start for lap 1
    #[inline]
    pub fn split_time(&self) -> Duration {
        self.split_time
    }

    /// Time since start through this lap
    #[inline]
    pub fn total_time(&self) -> Duration {
        self.total_time
    }
}
