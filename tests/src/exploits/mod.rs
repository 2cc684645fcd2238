//! # Attack Simulations
//!
//! Compromised or impersonated components trying to get commands past the
//! monitor and the safety block of the hardened vehicle.

pub mod bypass;
pub mod policy_fuzz;
