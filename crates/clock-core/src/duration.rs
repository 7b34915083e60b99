//! Duration primitive for the clock engine
//!
//! A non-negative span of time stored as whole seconds plus a nanosecond
//! fraction. All arithmetic saturates instead of wrapping, so a `Duration`
//! can never go negative.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use crate::error::{ClockError, ClockResult};
use crate::format;

const NANOS_PER_SEC: u32 = 1_000_000_000;
const NANOS_PER_MILLI: u32 = 1_000_000;
const NANOS_PER_MICRO: u32 = 1_000;

/// Non-negative time span with nanosecond precision
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    secs: u64,
    /// Always `< NANOS_PER_SEC`
    nanos: u32,
}

impl Duration {
    pub const ZERO: Duration = Duration { secs: 0, nanos: 0 };
    pub const MAX: Duration = Duration {
        secs: u64::MAX,
        nanos: NANOS_PER_SEC - 1,
    };

    /// Create a duration from whole seconds and a nanosecond fraction.
    /// Excess nanoseconds carry into the seconds; the result saturates at `MAX`.
    #[inline]
    pub fn new(secs: u64, nanos: u32) -> Self {
        let carry = u64::from(nanos / NANOS_PER_SEC);
        match secs.checked_add(carry) {
            Some(secs) => Duration {
                secs,
                nanos: nanos % NANOS_PER_SEC,
            },
            None => Duration::MAX,
        }
    }

    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Duration { secs, nanos: 0 }
    }

    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Duration {
            secs: millis / 1_000,
            nanos: (millis % 1_000) as u32 * NANOS_PER_MILLI,
        }
    }

    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Duration {
            secs: micros / 1_000_000,
            nanos: (micros % 1_000_000) as u32 * NANOS_PER_MICRO,
        }
    }

    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        Duration {
            secs: nanos / NANOS_PER_SEC as u64,
            nanos: (nanos % NANOS_PER_SEC as u64) as u32,
        }
    }

    /// Build a duration from floating-point seconds.
    ///
    /// Fails for negative, NaN, infinite or out-of-range input.
    pub fn try_from_secs_f64(secs: f64) -> ClockResult<Self> {
        if !secs.is_finite() {
            return Err(ClockError::NotFinite(secs));
        }
        if secs < 0.0 {
            return Err(ClockError::Negative(secs));
        }
        std::time::Duration::try_from_secs_f64(secs)
            .map(Duration::from)
            .map_err(|_| ClockError::Overflow(secs))
    }

    /// Whole seconds, truncating the fraction
    #[inline]
    pub const fn as_secs(self) -> u64 {
        self.secs
    }

    /// Seconds including the fractional part
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.secs as f64 + f64::from(self.nanos) / f64::from(NANOS_PER_SEC)
    }

    #[inline]
    pub const fn as_millis(self) -> u128 {
        self.secs as u128 * 1_000 + (self.nanos / NANOS_PER_MILLI) as u128
    }

    #[inline]
    pub const fn as_nanos(self) -> u128 {
        self.secs as u128 * NANOS_PER_SEC as u128 + self.nanos as u128
    }

    #[inline]
    pub const fn subsec_millis(self) -> u32 {
        self.nanos / NANOS_PER_MILLI
    }

    #[inline]
    pub const fn subsec_nanos(self) -> u32 {
        self.nanos
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    pub fn checked_add(self, rhs: Duration) -> Option<Duration> {
        let mut secs = self.secs.checked_add(rhs.secs)?;
        let mut nanos = self.nanos + rhs.nanos;
        if nanos >= NANOS_PER_SEC {
            nanos -= NANOS_PER_SEC;
            secs = secs.checked_add(1)?;
        }
        Some(Duration { secs, nanos })
    }

    pub fn checked_sub(self, rhs: Duration) -> Option<Duration> {
        let mut secs = self.secs.checked_sub(rhs.secs)?;
        let nanos = if self.nanos >= rhs.nanos {
            self.nanos - rhs.nanos
        } else {
            secs = secs.checked_sub(1)?;
            self.nanos + NANOS_PER_SEC - rhs.nanos
        };
        Some(Duration { secs, nanos })
    }

    #[inline]
    pub fn saturating_add(self, rhs: Duration) -> Duration {
        self.checked_add(rhs).unwrap_or(Duration::MAX)
    }

    #[inline]
    pub fn saturating_sub(self, rhs: Duration) -> Duration {
        self.checked_sub(rhs).unwrap_or(Duration::ZERO)
    }
}

impl Add for Duration {
    type Output = Duration;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Duration {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        *self = self.saturating_add(rhs);
    }
}

impl Sub for Duration {
    type Output = Duration;

    /// Clamps at zero; a span never goes negative
    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl From<std::time::Duration> for Duration {
    #[inline]
    fn from(d: std::time::Duration) -> Self {
        Duration {
            secs: d.as_secs(),
            nanos: d.subsec_nanos(),
        }
    }
}

impl From<Duration> for std::time::Duration {
    #[inline]
    fn from(d: Duration) -> Self {
        std::time::Duration::new(d.secs, d.nanos)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}s", self.secs, self.nanos)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_clock(f, *self)
    }
}
