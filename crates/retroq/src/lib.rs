//! Partial retroactive FIFO queue.
//!
//! A [`RetroactiveQueue`] is a FIFO queue whose operation history can be
//! edited after the fact: an enqueue or dequeue can be inserted into or
//! removed from an arbitrary past point of the timeline. Only *present*
//! state is observable ("partial" retroactivity) — `front()` and `back()`
//! answer for "now", never for a past time.
//!
//! # Design
//!
//! Enqueue events form a doubly linked chronological chain stored in a
//! slab-style arena (stable indices, explicit free list — no raw pointer
//! aliasing). Dequeues are a separate ordered log of timestamps; with `d`
//! logged dequeues, FIFO consumption always takes the `d` chronologically
//! earliest events, so the front cursor is simply the event at position
//! `d`. Every retroactive amendment moves the cursor by at most one link:
//!
//! - inserting an enqueue before the front retracts the cursor one link
//!   (an extra early event is now part of history, so one fewer dequeue
//!   reaches the old front);
//! - deleting an enqueue at or before the front advances it one link (the
//!   dequeue that consumed the deleted event takes the next one);
//! - inserting or deleting a dequeue moves the cursor one link forward or
//!   back, whatever timestamp the amended dequeue carries.
//!
//! Timestamps come from a monotonic [`LogicalClock`] owned by the queue
//! instance, ticking in strides of 100 so retroactive times fit between
//! forward ticks. All timestamps on the enqueue chain must be distinct;
//! collisions and other broken preconditions surface as [`RetroError`]
//! values, never as aborts.
//!
//! ```
//! use retroq::{LogicalTime, RetroactiveQueue};
//!
//! let mut q = RetroactiveQueue::new();
//! q.enqueue("a"); // t=100
//! q.enqueue("b"); // t=200
//!
//! // History never had "b"; it had an earlier "z" instead.
//! q.retro_delete_enqueue(LogicalTime::new(200))?;
//! q.retro_insert_enqueue(LogicalTime::new(50), "z")?;
//!
//! assert_eq!(q.front(), Some(&"z"));
//! # Ok::<(), retroq::RetroError>(())
//! ```

mod arena;
mod dequeue_log;
mod error;
mod queue;
mod time;

pub use error::RetroError;
pub use queue::RetroactiveQueue;
pub use time::{LogicalClock, LogicalTime};

/// Result type for timeline operations.
pub type Result<T> = std::result::Result<T, RetroError>;
