//! Stopwatch configuration

/// Clock configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    /// Initial lap history allocation
    pub lap_capacity: usize,
    /// Maximum number of laps kept per run (None = unbounded)
    pub max_laps: Option<usize>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            lap_capacity: 16,
            max_laps: None,
        }
    }
}

impl ClockConfig {
    /// Configuration for memory-constrained hosts
    pub fn embedded() -> Self {
        ClockConfig {
            lap_capacity: 8,
            max_laps: Some(99),
        }
    }

    /// Whether another lap fits after `recorded` laps
    #[inline]
    pub fn accepts_lap(&self, recorded: usize) -> bool {
        self.max_laps.map_or(true, |max| recorded < max)
    }
}
