//! Internal VisibilityQueue implementation with insertion-order scanning
//!
//! This module provides the core queue functionality with:
//! - Visibility-timeout custody: a retrieved message stays on the queue,
//!   hidden from other consumers until its custody window expires
//! - Bounded-capacity backpressure with timed blocking on `put`
//! - Arc-wrapped payloads for zero-copy sharing between consumers
//! - One mutex plus two condition variables coordinating producers and
//!   consumers; waits always compute the exact next wake deadline instead
//!   of polling

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::message::QueueMessage;
use crate::queue::types::QueueStats;
use log::{debug, trace};
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Custody window applied when a caller has no better value
///
/// Rust has no default arguments, so the conventional custody length is
/// exposed as a named constant for callers of [`VisibilityQueue::get`].
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Custody cap applied when `now + acquire_timeout` is not representable
/// on the monotonic clock; far enough to behave as "held indefinitely"
const CUSTODY_CAP: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Internal queue entry: id, shared payload and the visibility deadline
#[derive(Debug)]
struct StoredMessage<T> {
    id: String,
    payload: Arc<T>,
    /// `None` means immediately visible; `Some(at)` hides the message
    /// until `at`. Visible/in-flight is derived from this field against
    /// the clock at read time, never stored separately.
    visible_at: Option<Instant>,
}

impl<T> StoredMessage<T> {
    fn is_visible(&self, now: Instant) -> bool {
        match self.visible_at {
            None => true,
            Some(at) => at <= now,
        }
    }
}

/// Mutex-guarded queue state: insertion-ordered messages plus the bound
#[derive(Debug)]
struct QueueState<T> {
    /// Insertion-order message buffer; ids unique by construction
    messages: VecDeque<StoredMessage<T>>,
    /// Maximum number of messages held at once; `0` means unbounded
    capacity: usize,
}

impl<T> QueueState<T> {
    fn contains(&self, id: &str) -> bool {
        self.messages.iter().any(|message| message.id == id)
    }

    fn is_full(&self) -> bool {
        self.capacity > 0 && self.messages.len() >= self.capacity
    }
}

/// Data shared between all clones of one queue
#[derive(Debug)]
struct SharedState<T> {
    state: Mutex<QueueState<T>>,
    /// Signalled by `delete` when a capacity slot frees up
    space_available: Condvar,
    /// Signalled by `put` when a message is inserted
    message_visible: Condvar,
}

/// In-process, thread-safe queue with visibility-timeout semantics
///
/// A successful [`get`](VisibilityQueue::get) does not remove the message;
/// it stamps a visibility deadline, giving the caller exclusive temporary
/// custody. The message is only ever removed by an explicit
/// [`delete`](VisibilityQueue::delete) naming its id. A message whose
/// custody window lapses without deletion simply becomes visible again; it
/// is never dropped silently.
///
/// In-flight messages still occupy capacity slots, which is what makes the
/// visibility timeout meaningful as backpressure: a stalled consumer keeps
/// the queue full.
///
/// Cloning the queue yields another handle to the same underlying state,
/// which is how one queue is shared between producer and consumer threads.
/// Separate queues share nothing, so independent queues can coexist in the
/// same process.
///
/// # Example
///
/// ```rust
/// use visibility_queue::{QueueError, VisibilityQueue};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue: VisibilityQueue<String> = VisibilityQueue::new(8);
///
/// queue.put("1.txt".to_string(), "file content".to_string(), Duration::from_secs(10))?;
///
/// // Acquire custody for 30 seconds, then settle the message.
/// let message = queue.get(Duration::from_secs(1), Duration::from_secs(30))?;
/// queue.delete(&message.id)?;
///
/// assert!(matches!(
///     queue.get(Duration::ZERO, Duration::from_secs(30)),
///     Err(QueueError::QueueEmpty)
/// ));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct VisibilityQueue<T> {
    shared: Arc<SharedState<T>>,
}

impl<T> VisibilityQueue<T> {
    /// Create a queue holding at most `capacity` messages
    ///
    /// A `capacity` of `0` means unbounded: [`full`](VisibilityQueue::full)
    /// is always `false` and `put` never fails with
    /// [`QueueError::QueueFull`].
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(SharedState {
                state: Mutex::new(QueueState {
                    messages: VecDeque::new(),
                    capacity,
                }),
                space_available: Condvar::new(),
                message_visible: Condvar::new(),
            }),
        }
    }

    /// Get the configured capacity (`0` = unbounded)
    pub fn capacity(&self) -> usize {
        self.shared.state.lock().unwrap().capacity
    }

    /// Insert a new message, visible immediately
    ///
    /// Fails with [`QueueError::DuplicateMessage`] if `id` is already
    /// present, visible or in-flight; the duplicate check happens before
    /// any capacity wait, so a duplicate fails immediately even when the
    /// queue is full. If the queue is full, the call blocks until a slot
    /// frees up or `timeout` elapses, whichever comes first; a `timeout`
    /// of zero never blocks.
    ///
    /// On success exactly one consumer waiting in `get` is woken.
    pub fn put(&self, id: String, payload: T, timeout: Duration) -> QueueResult<()> {
        let mut state = self.shared.state.lock().unwrap();

        if state.contains(&id) {
            return Err(QueueError::DuplicateMessage { id });
        }

        // A timeout too large for the monotonic clock means no deadline;
        // the wait below is then bounded only by capacity freeing up.
        let deadline = Instant::now().checked_add(timeout);
        while state.is_full() {
            let now = Instant::now();
            if deadline.is_some_and(|deadline| now >= deadline) {
                debug!(
                    "put '{}': queue still full (capacity {}) after {:?}",
                    id, state.capacity, timeout
                );
                return Err(QueueError::QueueFull {
                    capacity: state.capacity,
                });
            }
            trace!(
                "put '{}': queue full ({}/{}), waiting for a slot",
                id,
                state.messages.len(),
                state.capacity
            );
            let wait = match deadline {
                Some(deadline) => deadline - now,
                None => Duration::MAX,
            };
            let (guard, _) = self
                .shared
                .space_available
                .wait_timeout(state, wait)
                .unwrap();
            state = guard;
            // Another producer may have registered the same id while we
            // were waiting for capacity.
            if state.contains(&id) {
                return Err(QueueError::DuplicateMessage { id });
            }
        }

        state.messages.push_back(StoredMessage {
            id,
            payload: Arc::new(payload),
            visible_at: None,
        });
        // Wake one waiter, not all: a woken consumer that finds nothing
        // eligible re-enters its wait.
        self.shared.message_visible.notify_one();
        Ok(())
    }

    /// Retrieve and acquire temporary custody of one visible message
    ///
    /// Scans in insertion order and returns the first message whose
    /// visibility deadline is unset or already passed. This is "first
    /// eligible", not strict FIFO: an in-flight message inserted earlier is
    /// temporarily excluded. The returned message stays on the queue with
    /// its deadline stamped to `now + acquire_timeout`; the scan and the
    /// stamp happen as one atomic unit under the lock, so two racing
    /// consumers can never acquire the same message.
    ///
    /// When nothing is eligible the call sleeps until the earliest
    /// in-flight deadline (or the next insertion, if the queue is empty),
    /// bounded by the caller's `timeout`, then re-scans. A `timeout` of
    /// zero performs exactly one scan without blocking. Fails with
    /// [`QueueError::QueueEmpty`] when the budget is exhausted, whether
    /// the queue held nothing at all or only in-flight messages. Failure
    /// alters no message state.
    pub fn get(&self, timeout: Duration, acquire_timeout: Duration) -> QueueResult<QueueMessage<T>> {
        let mut state = self.shared.state.lock().unwrap();
        // As in `put`: an unrepresentable timeout means no deadline.
        let deadline = Instant::now().checked_add(timeout);

        loop {
            let now = Instant::now();
            let mut next_visible: Option<Instant> = None;

            for message in state.messages.iter_mut() {
                match message.visible_at {
                    // In-flight; remember the earliest deadline so the
                    // wait below wakes exactly when it becomes eligible.
                    Some(at) if at > now => {
                        next_visible = Some(next_visible.map_or(at, |earliest| earliest.min(at)));
                    }
                    _ => {
                        message.visible_at = Some(
                            now.checked_add(acquire_timeout)
                                .unwrap_or_else(|| now + CUSTODY_CAP),
                        );
                        trace!("get: acquired '{}' for {:?}", message.id, acquire_timeout);
                        return Ok(QueueMessage::new(
                            message.id.clone(),
                            Arc::clone(&message.payload),
                        ));
                    }
                }
            }

            if deadline.is_some_and(|deadline| now >= deadline) {
                debug!("get: nothing became visible within {:?}", timeout);
                return Err(QueueError::QueueEmpty);
            }

            let wait = match (next_visible, deadline) {
                (Some(at), Some(deadline)) => at.min(deadline) - now,
                (Some(at), None) => at - now,
                (None, Some(deadline)) => deadline - now,
                (None, None) => Duration::MAX,
            };
            let (guard, _) = self
                .shared
                .message_visible
                .wait_timeout(state, wait)
                .unwrap();
            state = guard;
        }
    }

    /// Permanently remove a message by id
    ///
    /// Deletion is custody-agnostic: any holder of the id may delete it,
    /// visible or in-flight. Frees one capacity slot and wakes one
    /// producer blocked in `put`. Fails with
    /// [`QueueError::UnknownMessage`] when the id is absent: never
    /// inserted, already deleted, or re-expired and deleted by someone
    /// else.
    pub fn delete(&self, id: &str) -> QueueResult<()> {
        let mut state = self.shared.state.lock().unwrap();
        match state.messages.iter().position(|message| message.id == id) {
            Some(index) => {
                state.messages.remove(index);
                trace!("delete '{}': removed, one capacity slot freed", id);
                self.shared.space_available.notify_one();
                Ok(())
            }
            None => Err(QueueError::UnknownMessage { id: id.to_string() }),
        }
    }

    /// Count of all messages currently held, visible or in-flight
    pub fn size(&self) -> usize {
        self.shared.state.lock().unwrap().messages.len()
    }

    /// Check if the queue holds no messages at all
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Check if the queue is at capacity
    ///
    /// In-flight messages count toward the bound. Unbounded queues
    /// (capacity `0`) are never full.
    pub fn full(&self) -> bool {
        self.shared.state.lock().unwrap().is_full()
    }

    /// Check whether a message with `id` is currently held
    pub fn contains(&self, id: &str) -> bool {
        self.shared.state.lock().unwrap().contains(id)
    }

    /// Snapshot of total / visible / in-flight counts
    pub fn stats(&self) -> QueueStats {
        let state = self.shared.state.lock().unwrap();
        let now = Instant::now();
        let visible_messages = state
            .messages
            .iter()
            .filter(|message| message.is_visible(now))
            .count();
        QueueStats {
            total_messages: state.messages.len(),
            visible_messages,
            in_flight_messages: state.messages.len() - visible_messages,
        }
    }
}

impl<T> Clone for VisibilityQueue<T> {
    /// Returns a new handle to the same underlying queue
    ///
    /// Used to share one queue between producer and consumer threads.
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}
