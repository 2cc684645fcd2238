//! # ci-03-safety-block
//!
//! Redundant enforcement layer and the last hop before the actuators.
//!
//! ## Overview
//!
//! The safety block keeps its own mission, route and position, derived from
//! the same upstream events as the control system but never from the control
//! system's state. Every speed and direction command is re-validated here
//! regardless of who produced it.
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `set_mission` | Own route copy |
//! | `position_update` | Own route progress |
//! | `set_speed` | Clamped to the ceiling (60 km/h), then forwarded |
//! | `set_direction` | Normalized to `[0, 360)`, route-checked, forwarded |
//! | `lock_cargo` / `release_cargo` | Forwarded to the cargo bay |
//!
//! ## Emergency Stop
//!
//! ```text
//! [ARMED] ──emergency_stop()──→ [LATCHED] (speed 0 forwarded)
//!                                   │
//!                                   └── set_speed / set_direction rejected
//! ```
//!
//! The latch has no release path; it holds for the rest of the run.

pub mod error;
pub mod ipc;
pub mod service;

pub use error::{SafetyError, SafetyResult};
pub use ipc::handler::SafetyBlockActor;
pub use service::{SafetyBlock, SafetyConfig, SafetyStatus, SpeedVerdict};
