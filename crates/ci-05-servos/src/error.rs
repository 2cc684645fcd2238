use shared_bus::BusError;
use shared_types::PayloadError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServoError {
    #[error("Malformed actuation command: {0}")]
    Payload(#[from] PayloadError),

    #[error("Drive unreachable: {0}")]
    Drive(#[from] BusError),
}
