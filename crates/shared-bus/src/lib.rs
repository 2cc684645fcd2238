//! # Shared Bus - Mailboxes and Actor Runtime
//!
//! Every vehicle component is an actor: an independently scheduled task with
//! one private mailbox and one control channel.
//!
//! ## Rules
//!
//! - Components never call each other; they only post [`Event`]s into
//!   mailboxes resolved by name through the [`MailboxRegistry`].
//! - All mailboxes are registered before any actor is spawned. After that the
//!   registry is read-only.
//! - A failure while handling one event is logged and isolated; the actor keeps
//!   draining its mailbox.
//!
//! ## Tick Loop
//!
//! ```text
//!        ┌──────────────────────────────────────────────────────┐
//!        ▼                                                      │
//!   on_tick() ──→ drain mailbox (FIFO, try_recv) ──→ poll control ──→ sleep(tick)
//!                                                      │
//!                                                      └─ stop ──→ exit
//! ```
//!
//! ## Mediation
//!
//! ```text
//!   direct:    control ─────────────────────────────→ servos
//!   hardened:  control ──→ [security] ──policy──→ safety ──→ [security] ──→ servos
//! ```
//!
//! [`Event`]: shared_types::Event

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod actor;
pub mod actuation;
pub mod error;
pub mod outbox;
pub mod registry;

// Re-export main types
pub use actor::{spawn_actor, Actor, ActorConfig, ActorHandle, DEFAULT_TICK};
pub use actuation::{ActuationSink, ActuationTargets, DirectActuation, MediatedActuation};
pub use error::{BusError, BusResult};
pub use outbox::{Delivery, Outbox};
pub use registry::{Mailbox, MailboxRegistry};

#[cfg(any(test, feature = "test-utils"))]
pub use actuation::testing::{ActuationCommand, RecordingActuation};
