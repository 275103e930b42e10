//! Visibility Queue Component
//!
//! A reusable in-process queue implementation with visibility-timeout
//! custody and support for multiple concurrent producers and consumers,
//! emulating the retrieve/settle semantics of hosted queue services.
//!
//! # Overview
//!
//! This module provides a bounded (or unbounded) message buffer keyed by
//! caller-supplied unique ids. Key behaviours include:
//!
//! - **Multiple Producers**: any number of threads can insert concurrently;
//!   a full queue applies timed backpressure
//! - **Multiple Consumers**: any number of threads can retrieve
//!   concurrently; each retrieval grants exclusive temporary custody
//! - **Visibility Timeout**: a retrieved message is hidden from other
//!   consumers until its custody window expires or it is deleted by id
//! - **Explicit Settlement**: messages are only removed by `delete`; an
//!   unclaimed in-flight message becomes visible again, never dropped
//! - **Memory Efficiency**: Arc-wrapped payloads enable zero-copy sharing
//! - **Exact Wakeups**: blocked calls sleep until the precise next-eligible
//!   deadline rather than polling
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ put                │ put                │ put
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │             VisibilityQueue (shared handle)             │
//! │  ┌─────────────────────────────────────────────────┐   │
//! │  │    insertion-ordered buffer, capacity-bounded   │   │
//! │  │  ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┐   │   │
//! │  │  │ a ● │ b   │ c ● │ d   │ e   │ f ● │ ... │   │   │
//! │  │  └─────┴─────┴─────┴─────┴─────┴─────┴─────┘   │   │
//! │  │        ● = in-flight (hidden until deadline)    │   │
//! │  └─────────────────────────────────────────────────┘   │
//! └────────┬───────────────┬───────────────┬────────────────┘
//!          │ get/delete    │ get/delete    │ get/delete
//! ┌────────┴──┐     ┌──────┴───┐     ┌─────┴────┐
//! │Consumer A │     │Consumer B│     │Consumer C│
//! └───────────┘     └──────────┘     └──────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use visibility_queue::{QueueError, VisibilityQueue};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let queue: VisibilityQueue<String> = VisibilityQueue::new(100);
//!
//! // Producer side
//! queue.put(
//!     "task-42".to_string(),
//!     "payload".to_string(),
//!     Duration::from_secs(10),
//! )?;
//!
//! // Consumer side: custody for 30 seconds, settle when done
//! let message = queue.get(Duration::from_secs(1), Duration::from_secs(30))?;
//! println!("Processing: {}", message.payload);
//! queue.delete(&message.id)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod internal;
mod message;
mod types;

pub mod api;

pub use error::{QueueError, QueueResult};
pub use internal::{VisibilityQueue, DEFAULT_ACQUIRE_TIMEOUT};
pub use message::QueueMessage;
pub use types::QueueStats;

#[cfg(test)]
mod tests;
