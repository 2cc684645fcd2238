//! # Component Wiring
//!
//! Decides who talks to whom.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                        DIRECT (baseline)                             │
//! │                                                                      │
//! │  planner → communication → control ──set_speed/direction──→ servos   │
//! │                               ▲   └──lock/release──→ cargo           │
//! │  sitl ⇄ navigation ───────────┘                      servos → sitl   │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │                        HARDENED                                      │
//! │                                                                      │
//! │  communication ─┐                                                    │
//! │  navigation ────┼──→ [security] ──policy──→ control | safety         │
//! │  control ───────┤                          safety | cargo            │
//! │  safety ────────┘                          servos | cargo            │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In the hardened topology every event between the trusted components and
//! everything that can command motion or cargo passes the monitor. The
//! drive-side links (servos → sitl, sitl ⇄ navigation polling) stay direct.

pub mod policies;
pub mod topology;

pub use policies::hardened_policies;
pub use topology::Topology;
