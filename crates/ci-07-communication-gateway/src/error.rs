use shared_bus::BusError;
use shared_types::PayloadError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Malformed mission: {0}")]
    Payload(#[from] PayloadError),

    #[error("Mission not forwarded: {0}")]
    Forward(#[from] BusError),
}
