//! # Component Container
//!
//! Configuration plus the container that builds, starts and stops every
//! component actor.

pub mod config;
pub mod system;

pub use config::{ConfigError, VehicleConfig};
pub use system::VehicleSystem;
