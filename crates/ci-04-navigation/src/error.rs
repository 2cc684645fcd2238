use shared_bus::BusError;
use shared_types::PayloadError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Malformed position: {0}")]
    Payload(#[from] PayloadError),

    #[error("Position not delivered: {0}")]
    Delivery(#[from] BusError),
}

pub type NavigationResult<T> = Result<T, NavigationError>;
