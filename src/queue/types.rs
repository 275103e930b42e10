//! Type definitions for the queue system
//!
//! This module contains the data structures used for queue statistics
//! and state snapshots.

/// Occupancy statistics for a visibility queue
///
/// All three counts are taken under the queue lock against a single clock
/// read, so they are mutually consistent:
/// `total_messages == visible_messages + in_flight_messages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStats {
    /// Total number of messages on the queue (visible and in-flight)
    pub total_messages: usize,
    /// Messages currently eligible for retrieval by any consumer
    pub visible_messages: usize,
    /// Messages under a consumer's temporary custody
    pub in_flight_messages: usize,
}
