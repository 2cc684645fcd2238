use shared_bus::BusError;
use shared_types::PayloadError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("Malformed mission: {0}")]
    Payload(#[from] PayloadError),

    #[error("Mission dispatch failed: {0}")]
    Dispatch(#[from] BusError),
}
