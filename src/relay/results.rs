//! Relay result types
//!
//! Defines result structures returned by relay operations.

use crate::relay::Operation;

/// Outcome of one event fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastResult {
    /// Relays handed to the transport successfully.
    pub delivered: usize,
    /// Recipients whose send failed.
    pub failed: usize,
    /// Stale peers evicted by the sweep preceding the fan-out.
    pub evicted: usize,
}

/// Result of applying one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    pub operation: Operation,
    pub broadcast: Option<BroadcastResult>,
}

impl ExecutionResult {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            broadcast: None,
        }
    }
}
