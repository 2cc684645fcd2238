//! # Vehicle Runtime Library
//!
//! Composition of the vehicle: configuration, wiring of the direct and
//! hardened topologies, the component container and the edge adapters.
//! The entry point is the `vehicle-runtime` binary.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod container;
pub mod wiring;

pub use container::{ConfigError, VehicleConfig, VehicleSystem};
pub use wiring::{hardened_policies, Topology};
