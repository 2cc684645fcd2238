//! # ci-06-cargo-bay
//!
//! Cargo lock actuator. Starts locked; `release_cargo` opens it and
//! `lock_cargo` closes it again.

pub mod service;

pub use service::{CargoBay, CargoState};
