//! Ordered log of dequeue timestamps.
//!
//! A dequeue's only effect on present state is to push the front cursor
//! one link forward, but amending a *specific* past dequeue needs its
//! timestamp. The log keeps the full ordered sequence of dequeue times,
//! separate from the enqueue chain; the cursor's chronological position
//! is always `len()`.

use std::collections::BTreeSet;

use crate::time::LogicalTime;

#[derive(Debug, Default, Clone)]
pub(crate) struct DequeueLog {
    times: BTreeSet<LogicalTime>,
}

impl DequeueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of logged dequeues.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn contains(&self, time: LogicalTime) -> bool {
        self.times.contains(&time)
    }

    /// Log a dequeue. Returns `false` if one already exists at `time`.
    pub fn insert(&mut self, time: LogicalTime) -> bool {
        self.times.insert(time)
    }

    /// Remove the dequeue logged at `time`. Returns `false` if absent.
    pub fn remove(&mut self, time: LogicalTime) -> bool {
        self.times.remove(&time)
    }

    /// Logged dequeue times in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = LogicalTime> + '_ {
        self.times.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(raw: i64) -> LogicalTime {
        LogicalTime::new(raw)
    }

    #[test]
    fn test_insert_and_remove() {
        let mut log = DequeueLog::new();
        assert!(log.insert(t(100)));
        assert!(log.insert(t(50)));
        assert_eq!(log.len(), 2);
        assert!(log.contains(t(50)));

        assert!(log.remove(t(100)));
        assert!(!log.remove(t(100)));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut log = DequeueLog::new();
        assert!(log.insert(t(100)));
        assert!(!log.insert(t(100)));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_iter_is_chronological() {
        let mut log = DequeueLog::new();
        log.insert(t(300));
        log.insert(t(100));
        log.insert(t(200));
        let times: Vec<_> = log.iter().collect();
        assert_eq!(times, vec![t(100), t(200), t(300)]);
    }
}
