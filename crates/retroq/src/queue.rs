//! The partial retroactive queue.

use tracing::trace;

use crate::Result;
use crate::arena::{NodeArena, NodeIdx};
use crate::dequeue_log::DequeueLog;
use crate::error::RetroError;
use crate::time::{LogicalClock, LogicalTime};

/// A FIFO queue whose operation history can be edited after the fact.
///
/// Enqueue events live on a chronological chain ordered strictly by
/// timestamp; dequeues are logged as a separate ordered sequence of
/// timestamps. Only present state is observable: with `d` logged
/// dequeues, the front is the event at chronological position `d`
/// (FIFO consumption always takes the `d` earliest events), and the back
/// is the most recent forward enqueue. Retroactive amendments move the
/// front cursor by at most one link, so edits near "now" stay O(1); the
/// splice point for an edit far in the past is found by a linear scan
/// anchored at the cursor, O(n) worst case by design.
///
/// Single-threaded; callers sharing a queue across threads must impose
/// external mutual exclusion.
#[derive(Debug)]
pub struct RetroactiveQueue<V> {
    arena: NodeArena<V>,
    /// Chronologically first event.
    head: Option<NodeIdx>,
    /// Chronologically last event.
    tail: Option<NodeIdx>,
    /// Earliest event not yet consumed; `None` when the chain is empty or
    /// every surviving event is consumed. Never points at a freed slot.
    front: Option<NodeIdx>,
    /// Most recent forward enqueue, for O(1) `back()`. Retro-inserts never
    /// move it.
    latest: Option<NodeIdx>,
    dequeues: DequeueLog,
    clock: LogicalClock,
}

impl<V> RetroactiveQueue<V> {
    /// Empty queue with a default clock (stride 100, starting at zero).
    pub fn new() -> Self {
        Self::with_clock(LogicalClock::new())
    }

    /// Empty queue with a caller-supplied clock.
    pub fn with_clock(clock: LogicalClock) -> Self {
        Self {
            arena: NodeArena::new(),
            head: None,
            tail: None,
            front: None,
            latest: None,
            dequeues: DequeueLog::new(),
            clock,
        }
    }

    // =========================================================================
    // Present-time queries
    // =========================================================================

    /// Value at the current front, or `None` when nothing is unconsumed.
    pub fn front(&self) -> Option<&V> {
        self.front.map(|idx| &self.arena.get(idx).value)
    }

    /// Timestamp of the current front event.
    pub fn front_time(&self) -> Option<LogicalTime> {
        self.front.map(|idx| self.arena.get(idx).time)
    }

    /// Value of the most recent forward enqueue, or `None` if no forward
    /// enqueue survives.
    pub fn back(&self) -> Option<&V> {
        self.latest.map(|idx| &self.arena.get(idx).value)
    }

    /// Timestamp of the most recent forward enqueue.
    pub fn back_time(&self) -> Option<LogicalTime> {
        self.latest.map(|idx| self.arena.get(idx).time)
    }

    /// Number of surviving enqueue events on the timeline.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// `true` when no enqueue event survives.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of surviving events not yet consumed by a dequeue.
    pub fn remaining(&self) -> usize {
        self.arena.len().saturating_sub(self.dequeues.len())
    }

    /// Surviving events in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (LogicalTime, &V)> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let idx = cursor?;
            let node = self.arena.get(idx);
            cursor = node.next;
            Some((node.time, &node.value))
        })
    }

    /// Logged dequeue timestamps in chronological order.
    pub fn dequeue_times(&self) -> impl Iterator<Item = LogicalTime> + '_ {
        self.dequeues.iter()
    }

    // =========================================================================
    // Forward operations
    // =========================================================================

    /// Append an enqueue at the next clock tick and return its timestamp.
    ///
    /// Ticks repeat until the time clears the chain tail, so an enqueue
    /// stays the chronological maximum even after retro-inserts at
    /// timestamps the clock had not reached yet.
    pub fn enqueue(&mut self, value: V) -> LogicalTime {
        let mut time = self.clock.tick();
        while let Some(tail) = self.tail {
            if self.arena.get(tail).time < time {
                break;
            }
            time = self.clock.tick();
        }

        let consumed = self.dequeues.len();
        let was_len = self.arena.len();
        let idx = self.arena.alloc(time, value);
        match self.tail {
            Some(tail) => {
                self.arena.get_mut(tail).next = Some(idx);
                self.arena.get_mut(idx).prev = Some(tail);
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.latest = Some(idx);

        // The cursor re-seats when this event is exactly the next one an
        // already-logged dequeue sequence leaves unconsumed.
        if self.front.is_none() && consumed == was_len {
            self.front = Some(idx);
        }

        trace!(%time, "enqueue appended");
        time
    }

    /// Log a dequeue at the next clock tick, consuming the current front.
    ///
    /// Returns the logged timestamp, or `None` (a no-op) when nothing is
    /// unconsumed. The event node itself stays on the timeline so history
    /// remains amendable.
    pub fn dequeue(&mut self) -> Option<LogicalTime> {
        let f = self.front?;
        let mut time = self.clock.tick();
        while self.dequeues.contains(time) {
            time = self.clock.tick();
        }
        self.dequeues.insert(time);
        self.front = self.arena.get(f).next;
        trace!(%time, "dequeue logged");
        Some(time)
    }

    // =========================================================================
    // Retroactive enqueue amendments
    // =========================================================================

    /// Insert an enqueue event at an arbitrary past `time`.
    ///
    /// Fails with [`RetroError::DuplicateTimestamp`] when an event already
    /// carries `time`; the timeline is untouched on failure.
    pub fn retro_insert_enqueue(&mut self, time: LogicalTime, value: V) -> Result<()> {
        let consumed = self.dequeues.len();
        let was_len = self.arena.len();

        let Some(anchor) = self.front.or(self.tail) else {
            // Empty chain: the new event is the sole node.
            let idx = self.arena.alloc(time, value);
            self.head = Some(idx);
            self.tail = Some(idx);
            if consumed == 0 {
                self.front = Some(idx);
            }
            trace!(%time, "retro-insert into empty timeline");
            return Ok(());
        };

        // Linear scan anchored at the cursor (or the tail when everything
        // is consumed), toward earlier or later time as needed.
        let anchor_time = self.arena.get(anchor).time;
        if time == anchor_time {
            return Err(RetroError::DuplicateTimestamp(time));
        }

        let old_front_time = self.front.map(|f| self.arena.get(f).time);

        if time < anchor_time {
            let mut at = anchor;
            while let Some(prev) = self.arena.get(at).prev {
                let prev_time = self.arena.get(prev).time;
                if prev_time == time {
                    return Err(RetroError::DuplicateTimestamp(time));
                }
                if prev_time < time {
                    break;
                }
                at = prev;
            }
            let idx = self.arena.alloc(time, value);
            self.splice_before(at, idx);
        } else {
            let mut at = anchor;
            while let Some(next) = self.arena.get(at).next {
                let next_time = self.arena.get(next).time;
                if next_time == time {
                    return Err(RetroError::DuplicateTimestamp(time));
                }
                if next_time > time {
                    break;
                }
                at = next;
            }
            let idx = self.arena.alloc(time, value);
            self.splice_after(at, idx);
        }

        // Cursor effect. Inserting chronologically before the front shifts
        // every consumed position up by one, so the front retracts one link
        // (its new predecessor is exactly the event FIFO now leaves
        // unconsumed first). Inserting after the front amends history the
        // dequeues never reach.
        match (self.front, old_front_time) {
            (Some(f), Some(front_time)) if time < front_time => {
                self.front = self.arena.get(f).prev;
                trace!(%time, "retro-insert retracted front cursor");
            }
            (None, _) if consumed == was_len => {
                // Exactly exhausted before: position `consumed` exists
                // again and is the chain tail.
                self.front = self.tail;
            }
            _ => {}
        }

        trace!(%time, "retro-insert spliced");
        Ok(())
    }

    /// Remove the enqueue event carrying exactly `time`, returning its
    /// value.
    ///
    /// Fails with [`RetroError::EmptyTimeline`] on an empty chain and
    /// [`RetroError::EnqueueNotFound`] when no event carries `time`; the
    /// timeline is untouched on failure.
    pub fn retro_delete_enqueue(&mut self, time: LogicalTime) -> Result<V> {
        let Some(anchor) = self.front.or(self.tail) else {
            return Err(RetroError::EmptyTimeline);
        };

        // Anchored scan mirroring the insert's strategy.
        let mut at = anchor;
        let anchor_time = self.arena.get(anchor).time;
        if time < anchor_time {
            while self.arena.get(at).time > time {
                match self.arena.get(at).prev {
                    Some(prev) => at = prev,
                    None => return Err(RetroError::EnqueueNotFound(time)),
                }
            }
        } else if time > anchor_time {
            while self.arena.get(at).time < time {
                match self.arena.get(at).next {
                    Some(next) => at = next,
                    None => return Err(RetroError::EnqueueNotFound(time)),
                }
            }
        }
        if self.arena.get(at).time != time {
            return Err(RetroError::EnqueueNotFound(time));
        }

        // Cursor effect, computed before the unlink. Deleting at or before
        // the front hands its consuming dequeue the next event instead, so
        // the front advances one link; deleting after the front is a pure
        // history amendment.
        if let Some(f) = self.front {
            if time <= self.arena.get(f).time {
                self.front = self.arena.get(f).next;
                trace!(%time, "retro-delete advanced front cursor");
            }
        }

        // `back()` must not dangle when the most recent forward enqueue is
        // deleted; redirect it to the chronological predecessor.
        if self.latest == Some(at) {
            self.latest = self.arena.get(at).prev;
        }

        self.unlink(at);
        let node = self.arena.free(at);
        trace!(%time, "retro-delete unlinked");
        Ok(node.value)
    }

    // =========================================================================
    // Retroactive dequeue amendments
    // =========================================================================

    /// Log a dequeue at a caller-supplied past `time`.
    ///
    /// Fails with [`RetroError::NothingToDequeue`] when every surviving
    /// event is already consumed and [`RetroError::DuplicateDequeue`] when
    /// a dequeue is already logged at `time`.
    pub fn retro_insert_dequeue(&mut self, time: LogicalTime) -> Result<()> {
        let Some(f) = self.front else {
            return Err(RetroError::NothingToDequeue);
        };
        if !self.dequeues.insert(time) {
            return Err(RetroError::DuplicateDequeue(time));
        }
        self.front = self.arena.get(f).next;
        trace!(%time, "retro dequeue logged");
        Ok(())
    }

    /// Remove the dequeue logged at exactly `time`, un-consuming one
    /// event.
    ///
    /// Fails with [`RetroError::DequeueNotFound`] when no dequeue is
    /// logged at `time`.
    pub fn retro_delete_dequeue(&mut self, time: LogicalTime) -> Result<()> {
        if !self.dequeues.remove(time) {
            return Err(RetroError::DequeueNotFound(time));
        }
        self.front = match self.front {
            // One fewer consumed position: the front retracts one link.
            Some(f) => self.arena.get(f).prev,
            // The cursor was exhausted; it re-materializes at the tail
            // only when exactly one surplus consumption was pending.
            None if self.dequeues.len() + 1 == self.arena.len() => self.tail,
            None => None,
        };
        trace!(%time, "retro dequeue removed");
        Ok(())
    }

    // =========================================================================
    // Chain maintenance
    // =========================================================================

    fn splice_before(&mut self, at: NodeIdx, idx: NodeIdx) {
        let prev = self.arena.get(at).prev;
        self.arena.get_mut(idx).prev = prev;
        self.arena.get_mut(idx).next = Some(at);
        self.arena.get_mut(at).prev = Some(idx);
        match prev {
            Some(prev) => self.arena.get_mut(prev).next = Some(idx),
            None => self.head = Some(idx),
        }
    }

    fn splice_after(&mut self, at: NodeIdx, idx: NodeIdx) {
        let next = self.arena.get(at).next;
        self.arena.get_mut(idx).next = next;
        self.arena.get_mut(idx).prev = Some(at);
        self.arena.get_mut(at).next = Some(idx);
        match next {
            Some(next) => self.arena.get_mut(next).prev = Some(idx),
            None => self.tail = Some(idx),
        }
    }

    fn unlink(&mut self, idx: NodeIdx) {
        let prev = self.arena.get(idx).prev;
        let next = self.arena.get(idx).next;
        match prev {
            Some(prev) => self.arena.get_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.arena.get_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }
}

impl<V> Default for RetroactiveQueue<V> {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
