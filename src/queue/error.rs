//! Queue Error Types

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Queue is full (capacity: {capacity})")]
    QueueFull { capacity: usize },

    #[error("No message became visible within the timeout")]
    QueueEmpty,

    #[error("A message with id '{id}' is already registered on the queue")]
    DuplicateMessage { id: String },

    #[error("No message with id '{id}' is on the queue (never inserted or already deleted)")]
    UnknownMessage { id: String },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
