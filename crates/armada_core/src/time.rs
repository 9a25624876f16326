//! Millisecond timestamps and durations.
//!
//! The economy timeline is expressed in integer milliseconds since the Unix
//! epoch. The core never reads the wall clock; callers supply `now` with
//! every query so identical inputs always produce identical outputs.

use serde::{Deserialize, Serialize};

/// A point on the economy timeline, in milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The origin of the timeline.
    pub const EPOCH: Self = Self(0);

    /// Create a timestamp from raw epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Raw epoch milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Elapsed time since `earlier`, clamped to zero if `earlier` is later.
    #[must_use]
    pub const fn saturating_since(self, earlier: Self) -> DurationMs {
        DurationMs(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add<DurationMs> for Timestamp {
    type Output = Self;

    fn add(self, rhs: DurationMs) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign<DurationMs> for Timestamp {
    fn add_assign(&mut self, rhs: DurationMs) {
        self.0 += rhs.0;
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A span of time in milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DurationMs(u64);

impl DurationMs {
    /// Zero duration.
    pub const ZERO: Self = Self(0);

    /// Create a duration from raw milliseconds.
    #[must_use]
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Create a duration from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * 1000)
    }

    /// Raw milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Whether this duration is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiply by a count, returning `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, count: u64) -> Option<Self> {
        self.0.checked_mul(count).map(Self)
    }

    /// How many whole multiples of `self` fit in `span`.
    ///
    /// Returns `None` for a zero interval, which would otherwise divide by
    /// zero; callers treat a zero interval as instant completion.
    #[must_use]
    pub fn whole_intervals_in(self, span: Self) -> Option<u64> {
        if self.0 == 0 {
            None
        } else {
            Some(span.0 / self.0)
        }
    }
}

impl std::ops::Add for DurationMs {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::fmt::Display for DurationMs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_arithmetic() {
        let t = Timestamp::from_millis(1000);
        assert_eq!(t + DurationMs::new(500), Timestamp::from_millis(1500));

        let mut u = t;
        u += DurationMs::from_secs(2);
        assert_eq!(u, Timestamp::from_millis(3000));
    }

    #[test]
    fn test_saturating_since() {
        let early = Timestamp::from_millis(100);
        let late = Timestamp::from_millis(350);

        assert_eq!(late.saturating_since(early), DurationMs::new(250));
        assert_eq!(early.saturating_since(late), DurationMs::ZERO);
    }

    #[test]
    fn test_whole_intervals() {
        let interval = DurationMs::from_secs(30);
        assert_eq!(interval.whole_intervals_in(DurationMs::from_secs(95)), Some(3));
        assert_eq!(interval.whole_intervals_in(DurationMs::ZERO), Some(0));
        assert_eq!(DurationMs::ZERO.whole_intervals_in(interval), None);
    }

    #[test]
    fn test_checked_mul() {
        assert_eq!(
            DurationMs::new(1000).checked_mul(60),
            Some(DurationMs::from_secs(60))
        );
        assert_eq!(DurationMs::new(u64::MAX).checked_mul(2), None);
    }
}
