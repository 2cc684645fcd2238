//! # ci-02-control-system
//!
//! Primary control loop: turns position updates into speed and direction
//! commands along the current mission's route.
//!
//! ## Overview
//!
//! - **Mission Intake**: `set_mission` replaces the route and immediately locks
//!   the cargo before any motion command is issued.
//! - **Waypoint Progress**: within the arrival tolerance of the next point the
//!   route advances; finishing the route releases the cargo.
//! - **Cargo Interlock**: an overloaded vehicle still updates its internal
//!   speed and bearing but emits nothing.
//! - **Fault Injection**: optional tampering at fixed waypoint indices, used to
//!   prove the safety block catches what this loop gets wrong.
//!
//! ## Data Flow
//!
//! ```text
//! Communication ──set_mission──→ Control ──lock/release_cargo──→ Cargo Bay
//! Navigation ──position_update──→ Control ──set_speed/set_direction──→ Servos | Safety
//! ```
//!
//! Whether commands reach the servos directly or the safety block through the
//! security monitor is decided by the [`shared_bus::ActuationSink`] supplied at
//! composition time.

pub mod error;
pub mod ipc;
pub mod service;

pub use error::{ControlError, ControlResult};
pub use ipc::handler::ControlSystemActor;
pub use service::{ControlConfig, ControlDecision, ControlStatus, ControlSystem, FaultInjection};
