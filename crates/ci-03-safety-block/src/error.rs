//! Error types for the safety block

use shared_bus::BusError;
use shared_types::{PayloadError, RouteError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SafetyError {
    #[error("Emergency stop active, {command} rejected")]
    EmergencyStopActive { command: &'static str },

    #[error("Negative speed rejected: {0} km/h")]
    NegativeSpeed(f64),

    #[error("Non-finite speed rejected: {0}")]
    NonFiniteSpeed(f64),

    #[error("Non-finite direction rejected: {0}")]
    NonFiniteDirection(f64),

    #[error("Direction {0} deg leaves the safe corridor")]
    UnsafeDirection(f64),

    #[error("Invalid mission: {0}")]
    InvalidMission(#[from] RouteError),

    #[error("Malformed event: {0}")]
    Payload(#[from] PayloadError),

    #[error("Command not delivered: {0}")]
    Delivery(#[from] BusError),
}

impl SafetyError {
    /// Refusals of an unsafe request, as opposed to processing failures.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::EmergencyStopActive { .. }
                | Self::NegativeSpeed(_)
                | Self::NonFiniteSpeed(_)
                | Self::NonFiniteDirection(_)
                | Self::UnsafeDirection(_)
        )
    }
}

/// Result type for safety operations
pub type SafetyResult<T> = Result<T, SafetyError>;
