//! Public API for the visibility queue
//!
//! This module provides the complete public API for the visibility-timeout
//! queue. External modules should import from here rather than directly
//! from internal modules. See module documentation for complete usage
//! examples and architecture details.

// Core queue component
pub use crate::queue::internal::{VisibilityQueue, DEFAULT_ACQUIRE_TIMEOUT};

// Message type handed out by `get`
pub use crate::queue::message::QueueMessage;

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};

// Statistics snapshot
pub use crate::queue::types::QueueStats;
