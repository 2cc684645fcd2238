//! # ci-07-communication-gateway
//!
//! Entry point for missions arriving from outside the vehicle. Each accepted
//! `set_mission` is kept and handed on to the mission consumers.
//!
//! ```text
//! Planner ──set_mission──→ Gateway ──set_mission──→ Control
//!                                  └─(hardened)───→ Safety
//! ```

pub mod error;
pub mod service;

pub use error::GatewayError;
pub use service::{CommunicationGateway, GatewayConfig};
