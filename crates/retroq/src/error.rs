//! Error types for retroactive timeline operations.

use thiserror::Error;

use crate::time::LogicalTime;

/// Errors raised when an operation violates a timeline precondition.
///
/// These replace the process-aborting asserts of the reference behavior:
/// every broken precondition surfaces as a value the caller can recover
/// from, and the timeline is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetroError {
    /// An enqueue event already carries this timestamp.
    #[error("an enqueue already exists at {0}")]
    DuplicateTimestamp(LogicalTime),

    /// No enqueue event carries this timestamp.
    #[error("no enqueue found at {0}")]
    EnqueueNotFound(LogicalTime),

    /// Retroactive delete on a timeline with no events.
    #[error("timeline is empty")]
    EmptyTimeline,

    /// A dequeue is already logged at this timestamp.
    #[error("a dequeue is already logged at {0}")]
    DuplicateDequeue(LogicalTime),

    /// No dequeue is logged at this timestamp.
    #[error("no dequeue logged at {0}")]
    DequeueNotFound(LogicalTime),

    /// Every surviving event is already consumed; a retroactively
    /// inserted dequeue would have had nothing to take.
    #[error("nothing left to dequeue")]
    NothingToDequeue,
}
