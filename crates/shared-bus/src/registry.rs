//! # Mailbox Registry
//!
//! Process-wide `name → mailbox` directory. Populated once per actor while the
//! system is being composed, read by every producer afterwards.

use parking_lot::RwLock;
use shared_types::{ActorId, Event};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{BusError, BusResult};
use autonomy_telemetry::metrics::BUS_EVENTS_UNDELIVERABLE;

/// Producer side of a mailbox.
pub type EventSender = mpsc::UnboundedSender<Event>;

/// Consumer side of a mailbox, owned by exactly one actor.
#[derive(Debug)]
pub struct Mailbox {
    owner: ActorId,
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl Mailbox {
    pub fn owner(&self) -> &ActorId {
        &self.owner
    }

    /// Pops the oldest queued event without waiting.
    pub fn try_next(&mut self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }
}

#[derive(Debug, Default)]
pub struct MailboxRegistry {
    mailboxes: RwLock<HashMap<ActorId, EventSender>>,
}

impl MailboxRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Stores `sender` under `name`.
    ///
    /// A second registration under the same name is refused and logged; the
    /// first mailbox stays in place.
    pub fn register(&self, name: impl Into<ActorId>, sender: EventSender) -> BusResult<()> {
        let name = name.into();
        let mut mailboxes = self.mailboxes.write();
        if mailboxes.contains_key(&name) {
            warn!(mailbox = %name, "Duplicate mailbox registration refused");
            return Err(BusError::AlreadyRegistered { name });
        }
        debug!(mailbox = %name, "Mailbox registered");
        mailboxes.insert(name, sender);
        Ok(())
    }

    /// Creates a mailbox and registers its sender under `name`.
    pub fn open_mailbox(&self, name: impl Into<ActorId>) -> BusResult<Mailbox> {
        let owner = name.into();
        let (sender, receiver) = mpsc::unbounded_channel();
        self.register(owner.clone(), sender)?;
        Ok(Mailbox { owner, receiver })
    }

    pub fn resolve(&self, name: &str) -> BusResult<EventSender> {
        self.mailboxes
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| BusError::NotFound {
                name: ActorId::from(name),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mailboxes.read().contains_key(name)
    }

    /// Registered names in lexical order.
    pub fn names(&self) -> Vec<ActorId> {
        let mut names: Vec<_> = self.mailboxes.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Pushes `event` into the mailbox named by its destination.
    pub fn deliver(&self, event: Event) -> BusResult<()> {
        let destination = event.destination.clone();
        self.deliver_to(&destination, event)
    }

    /// Pushes `event` into `mailbox`, leaving its logical destination untouched.
    pub fn deliver_to(&self, mailbox: &ActorId, event: Event) -> BusResult<()> {
        let result = self.resolve(mailbox.as_str()).and_then(|sender| {
            sender.send(event).map_err(|_| BusError::MailboxClosed {
                name: mailbox.clone(),
            })
        });
        if result.is_err() {
            BUS_EVENTS_UNDELIVERABLE
                .with_label_values(&[mailbox.as_str()])
                .inc();
        }
        result
    }
}
