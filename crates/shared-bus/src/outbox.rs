//! # Outbox
//!
//! Sending side of an actor. Every event leaving an outbox is stamped with the
//! owner's identity as `source`; producers cannot forge another sender.

use shared_types::{ActorId, Event, Operation, Payload};
use std::sync::Arc;

use crate::error::BusResult;
use crate::registry::MailboxRegistry;

/// How an event reaches its logical destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Straight into the destination's mailbox.
    Direct,
    /// Into the monitor's mailbox, destination preserved for policy checks.
    Mediated { monitor: ActorId },
}

impl Delivery {
    pub fn mediated(monitor: impl Into<ActorId>) -> Self {
        Self::Mediated {
            monitor: monitor.into(),
        }
    }

    /// Mailbox an event for `destination` is physically pushed into.
    pub fn ingress<'a>(&'a self, destination: &'a ActorId) -> &'a ActorId {
        match self {
            Self::Direct => destination,
            Self::Mediated { monitor } => monitor,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Outbox {
    identity: ActorId,
    registry: Arc<MailboxRegistry>,
}

impl Outbox {
    pub fn new(identity: impl Into<ActorId>, registry: Arc<MailboxRegistry>) -> Self {
        Self {
            identity: identity.into(),
            registry,
        }
    }

    pub fn identity(&self) -> &ActorId {
        &self.identity
    }

    pub fn registry(&self) -> &Arc<MailboxRegistry> {
        &self.registry
    }

    pub fn event(&self, destination: &ActorId, operation: Operation, payload: Payload) -> Event {
        Event::new(self.identity.clone(), destination.clone(), operation, payload)
    }

    /// Sends directly to `destination`.
    pub fn post(&self, destination: &ActorId, operation: Operation, payload: Payload) -> BusResult<()> {
        self.registry
            .deliver(self.event(destination, operation, payload))
    }

    /// Sends to `destination` along `delivery`.
    pub fn send(
        &self,
        delivery: &Delivery,
        destination: &ActorId,
        operation: Operation,
        payload: Payload,
    ) -> BusResult<()> {
        self.dispatch(delivery, self.event(destination, operation, payload))
    }

    /// Sends one event per consumer. Every consumer is attempted; the first
    /// failure is returned.
    pub fn broadcast(
        &self,
        delivery: &Delivery,
        consumers: &[ActorId],
        operation: Operation,
        payload: Payload,
    ) -> BusResult<()> {
        let mut first_error = None;
        for consumer in consumers {
            if let Err(e) = self.send(delivery, consumer, operation.clone(), payload.clone()) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Pushes an already built event along `delivery`.
    pub fn dispatch(&self, delivery: &Delivery, event: Event) -> BusResult<()> {
        let ingress = delivery.ingress(&event.destination).clone();
        self.registry.deliver_to(&ingress, event)
    }
}
