//! Test modules for the queue system
//!
//! This module organizes all the test suites for the visibility queue.
//! Tests are organized by functional area for better maintainability.

mod visibility;
