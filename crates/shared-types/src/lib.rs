//! # Shared Types Crate
//!
//! This crate contains every type that crosses a mailbox boundary, plus the
//! pure route-progress state machine both control loops derive from a mission.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-component types are defined here.
//! - **Envelope Authority**: An [`Event`]'s `(source, destination, operation)`
//!   triple is the only thing the security monitor looks at.
//! - **Value Semantics**: Events and missions travel by value; a consumer can
//!   never mutate what a producer still holds.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod geo;
pub mod identity;
pub mod route;
pub mod security;

pub use entities::*;
pub use envelope::{ControlEvent, ControlOperation, Event, Operation, Payload};
pub use errors::*;
pub use identity::{names, ActorId};
pub use route::Route;
pub use security::SecurityPolicy;
