//! # Cyber-Immune Vehicle Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/      # Cross-component flows over the mailbox bus
//! │   ├── scenarios.rs  # Reference scenarios A-D on live actors
//! │   ├── e2e_mission.rs# Whole vehicle driving a mission in the simulator
//! │   └── topology.rs   # Direct vs hardened under fault injection
//! │
//! └── exploits/         # Attack simulations against the hardened vehicle
//!     ├── bypass.rs     # Compromised components skipping the safety block
//!     └── policy_fuzz.rs# Random traffic against the policy table
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ci-tests
//!
//! # By category
//! cargo test -p ci-tests integration::
//! cargo test -p ci-tests exploits::
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod exploits;
pub mod integration;
