use shared_bus::BusError;
use shared_types::PayloadError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SitlError {
    #[error("Malformed command: {0}")]
    Payload(#[from] PayloadError),

    #[error("Position reply failed: {0}")]
    Reply(#[from] BusError),
}
