//! # ci-04-navigation
//!
//! Position feed of the vehicle.
//!
//! Every tick the navigation system asks the position source (the simulator)
//! for coordinates with `post_position`. Each `position_update` reply is
//! stored and re-published as `position_update` to the configured consumers,
//! directly or through the security monitor.
//!
//! ```text
//! Navigation ──post_position──→ SITL
//! SITL ──position_update──→ Navigation ──position_update──→ Control (+ Safety)
//! ```

pub mod error;
pub mod service;

pub use error::{NavigationError, NavigationResult};
pub use service::{NavigationConfig, NavigationSystem};
