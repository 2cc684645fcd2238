//! # ci-05-servos
//!
//! Drive actuators. Accepts `set_speed` (km/h) and `set_direction` (degrees),
//! keeps the last applied values and forwards each one to the drive, which in
//! this system is the kinematic simulator.

pub mod error;
pub mod service;

pub use error::ServoError;
pub use service::{ServoStatus, Servos};
