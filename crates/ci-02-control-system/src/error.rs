//! Error types for the control system

use shared_bus::BusError;
use shared_types::{PayloadError, RouteError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    /// Mission could not be turned into a route; previous mission kept
    #[error("Invalid mission: {0}")]
    InvalidMission(#[from] RouteError),

    #[error("Negative speed rejected: {0} km/h")]
    NegativeSpeed(f64),

    #[error("Negative direction rejected: {0} deg")]
    NegativeDirection(f64),

    #[error("Negative cargo weight rejected: {0}")]
    NegativeCargoWeight(f64),

    #[error("Malformed event: {0}")]
    Payload(#[from] PayloadError),

    #[error("Command not delivered: {0}")]
    Delivery(#[from] BusError),
}

/// Result type for control operations
pub type ControlResult<T> = Result<T, ControlError>;
