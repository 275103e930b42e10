//! Message Type Handed Out by the Queue
//!
//! This module defines the message structure returned by `get`. The queue
//! treats payloads as opaque values: it never inspects or mutates them.

use std::sync::Arc;

/// A message retrieved from the queue
///
/// Returned by a successful `get`. The message itself stays on the queue,
/// in-flight, until it is either deleted by id or its custody window
/// expires and another consumer re-acquires it.
///
/// # Payload aliasing
///
/// The payload is shared, not deep-copied: the queue stores each payload
/// behind an `Arc` and every successful `get` clones that `Arc`. A payload
/// without interior mutability therefore cannot change underneath a
/// producer or consumer after insertion.
///
/// # Example
///
/// ```rust
/// use visibility_queue::VisibilityQueue;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue: VisibilityQueue<String> = VisibilityQueue::new(1);
/// queue.put("1.txt".to_string(), "file content".to_string(), Duration::ZERO)?;
///
/// let message = queue.get(Duration::ZERO, Duration::from_secs(10))?;
/// assert_eq!(message.id, "1.txt");
/// assert_eq!(*message.payload, "file content");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QueueMessage<T> {
    /// Caller-supplied unique key, stable for the message's lifetime
    pub id: String,
    /// Shared reference to the opaque payload supplied by the producer
    pub payload: Arc<T>,
}

impl<T> QueueMessage<T> {
    pub(crate) fn new(id: String, payload: Arc<T>) -> Self {
        Self { id, payload }
    }
}

// Manual impl so cloning never requires `T: Clone`; only the Arc is cloned.
impl<T> Clone for QueueMessage<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            payload: Arc::clone(&self.payload),
        }
    }
}
