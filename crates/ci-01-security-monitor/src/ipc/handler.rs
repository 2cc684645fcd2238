//! Mailbox handler for the security monitor
//!
//! Every event in the monitor's mailbox is a mediation request. Outcomes are
//! logged here; none of them is an error of the monitor itself.

use async_trait::async_trait;
use shared_bus::Actor;
use shared_types::{ActorId, Event};
use std::convert::Infallible;
use tracing::{debug, error};

use crate::error::MonitorError;
use crate::service::SecurityMonitor;

pub struct SecurityMonitorActor {
    monitor: SecurityMonitor,
}

impl SecurityMonitorActor {
    pub fn new(monitor: SecurityMonitor) -> Self {
        Self { monitor }
    }
}

#[async_trait]
impl Actor for SecurityMonitorActor {
    type Error = Infallible;

    fn name(&self) -> &ActorId {
        self.monitor.identity()
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), Infallible> {
        let id = event.id;
        match self.monitor.mediate(event) {
            Ok(()) => debug!(event_id = %id, "Event authorized and forwarded"),
            Err(MonitorError::Unauthorized {
                sender,
                destination,
                operation,
            }) => error!(
                event_id = %id,
                source = %sender,
                destination = %destination,
                operation = %operation,
                "Event denied: no matching security policy"
            ),
            Err(e @ MonitorError::Undeliverable { .. }) => {
                error!(event_id = %id, error = %e, "Authorized event dropped")
            }
        }
        Ok(())
    }
}
