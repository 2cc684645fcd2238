//! # Security Policies
//!
//! An allow-rule over the `(source, destination, operation)` triple of an
//! [`Event`]. Matching is exact equality on all three fields: no wildcards,
//! no prefixes, no precedence between rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::envelope::{Event, Operation};
use crate::identity::ActorId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityPolicy {
    pub source: ActorId,
    pub destination: ActorId,
    pub operation: Operation,
}

impl SecurityPolicy {
    pub fn new(
        source: impl Into<ActorId>,
        destination: impl Into<ActorId>,
        operation: Operation,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            operation,
        }
    }

    /// Whether this rule authorizes `event`.
    pub fn permits(&self, event: &Event) -> bool {
        self.source == event.source
            && self.destination == event.destination
            && self.operation == event.operation
    }
}

impl fmt::Display for SecurityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}",
            self.source, self.destination, self.operation
        )
    }
}
