//! Logical timestamps and the per-queue monotonic clock.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A totally ordered logical timestamp on the timeline.
///
/// Forward operations receive strictly increasing times from the queue's
/// [`LogicalClock`]; retroactive operations carry caller-supplied times
/// that must not collide with any time already on the timeline.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LogicalTime(i64);

impl LogicalTime {
    /// Wrap a raw timestamp.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw timestamp value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for LogicalTime {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for LogicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

/// Monotonic clock owned by a queue instance.
///
/// Ticks advance by a fixed stride (default 100) rather than 1, leaving
/// room for retroactive timestamps strictly between forward ticks.
/// Owning the clock per instance keeps timestamp allocation deterministic
/// and testable; there is no process-wide counter.
#[derive(Clone, Debug)]
pub struct LogicalClock {
    now: i64,
    stride: i64,
}

impl LogicalClock {
    /// Default gap between consecutive forward ticks.
    pub const DEFAULT_STRIDE: i64 = 100;

    /// Clock starting at zero with the default stride.
    pub fn new() -> Self {
        Self::with_stride(Self::DEFAULT_STRIDE)
    }

    /// Clock starting at zero with a custom stride (clamped to at least 1).
    pub fn with_stride(stride: i64) -> Self {
        Self {
            now: 0,
            stride: stride.max(1),
        }
    }

    /// The most recently issued time (zero before the first tick).
    pub fn now(&self) -> LogicalTime {
        LogicalTime(self.now)
    }

    /// Advance by one stride and return the new time.
    pub fn tick(&mut self) -> LogicalTime {
        self.now += self.stride;
        LogicalTime(self.now)
    }
}

impl Default for LogicalClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_are_strictly_increasing() {
        let mut clock = LogicalClock::new();
        let a = clock.tick();
        let b = clock.tick();
        let c = clock.tick();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_default_stride_is_100() {
        let mut clock = LogicalClock::new();
        assert_eq!(clock.tick(), LogicalTime::new(100));
        assert_eq!(clock.tick(), LogicalTime::new(200));
        assert_eq!(clock.now(), LogicalTime::new(200));
    }

    #[test]
    fn test_custom_stride() {
        let mut clock = LogicalClock::with_stride(10);
        assert_eq!(clock.tick(), LogicalTime::new(10));
        assert_eq!(clock.tick(), LogicalTime::new(20));
    }

    #[test]
    fn test_stride_clamped_to_one() {
        let mut clock = LogicalClock::with_stride(-5);
        assert_eq!(clock.tick(), LogicalTime::new(1));
        assert_eq!(clock.tick(), LogicalTime::new(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(LogicalTime::new(150).to_string(), "t=150");
    }
}
