//! Error types for the security monitor

use shared_bus::BusError;
use shared_types::{ActorId, Operation};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    /// No policy matches the event's triple
    #[error("Unauthorized: {sender} -> {destination}: {operation}")]
    Unauthorized {
        sender: ActorId,
        destination: ActorId,
        operation: Operation,
    },

    /// Authorized, but the destination mailbox could not take the event
    #[error("Cannot forward to '{destination}': {reason}")]
    Undeliverable {
        destination: ActorId,
        reason: BusError,
    },
}

/// Result type for mediation
pub type MonitorResult<T> = Result<T, MonitorError>;
