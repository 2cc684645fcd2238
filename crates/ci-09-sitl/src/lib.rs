//! # ci-09-sitl
//!
//! Software-in-the-loop simulator of the vehicle body.
//!
//! The simulator keeps position, speed (km/h) and bearing (degrees). Every
//! tick it moves the vehicle `speed × tick` along the bearing on the great
//! circle. The servos drive it with `set_speed`/`set_direction`; navigation
//! reads it with `post_position`, answered by `position_update`.
//!
//! With telemetry enabled each position answer is mirrored as
//! `post_telemetry` to the telemetry egress, carrying speed and bearing as
//! extra parameters.

pub mod error;
pub mod service;

pub use error::SitlError;
pub use service::{Sitl, SitlConfig, SitlStatus};
