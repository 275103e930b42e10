//! In-process, thread-safe message queue with visibility-timeout semantics.
//!
//! A consumer that retrieves a message gets exclusive temporary custody of
//! it; the message becomes visible to other consumers again if it is not
//! deleted before its custody window expires. See the [`queue`] module for
//! the full component documentation.

pub mod queue;

pub use queue::{
    QueueError, QueueMessage, QueueResult, QueueStats, VisibilityQueue, DEFAULT_ACQUIRE_TIMEOUT,
};
