//! # ci-01-security-monitor
//!
//! Mediator that authorizes and forwards every inter-component message in the
//! hardened topology.
//!
//! ## Overview
//!
//! - **Default Deny**: an event is forwarded only if its
//!   `(source, destination, operation)` triple equals some policy exactly.
//! - **Verbatim Forwarding**: authorized events reach the destination
//!   mailbox unchanged, so the consumer sees the original producer as source.
//! - **Fire and Forget**: denied or undeliverable events are logged and
//!   dropped; the producer is never notified and nothing is retried.
//! - **Runtime Replacement**: the policy table sits behind a shared
//!   [`PolicyStore`] handle the orchestrator may swap at any time.
//!
//! ## Decision Flow
//!
//! ```text
//! producer ──Event──→ [security mailbox]
//!                            │
//!                  (src, dst, op) ∈ policies ?
//!                     │               │
//!                    yes              no ──→ error log, drop
//!                     │
//!              registry.resolve(dst)
//!                     │         │
//!                   found     missing ──→ error log, drop
//!                     │
//!                     └──→ [dst mailbox]
//! ```

pub mod domain;
pub mod error;
pub mod ipc;
pub mod service;

pub use domain::policy_store::PolicyStore;
pub use error::{MonitorError, MonitorResult};
pub use ipc::handler::SecurityMonitorActor;
pub use service::{MonitorStats, SecurityMonitor};
