//! Error types shared across components.

use thiserror::Error;

/// An event carried a payload of the wrong kind for its operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Payload mismatch: expected {expected}, got {actual}")]
    Mismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// A mission could not be turned into a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Route has no points")]
    Empty,

    #[error("Route has {limits} speed limits but only {points} points")]
    TooManySpeedLimits { points: usize, limits: usize },
}
