//! Security Monitor - authorization and forwarding

use shared_bus::MailboxRegistry;
use shared_types::{names, ActorId, Event, Operation, SecurityPolicy};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

use crate::domain::policy_store::PolicyStore;
use crate::error::{MonitorError, MonitorResult};
use autonomy_telemetry::metrics::{MONITOR_EVENTS_AUTHORIZED, MONITOR_EVENTS_DENIED};

/// Running totals, shared with whoever holds the handle.
#[derive(Debug, Default)]
pub struct MonitorStats {
    forwarded: AtomicU64,
    denied: AtomicU64,
    undeliverable: AtomicU64,
}

impl MonitorStats {
    pub fn forwarded(&self) -> u64 {
        self.forwarded.load(Ordering::Relaxed)
    }

    pub fn denied(&self) -> u64 {
        self.denied.load(Ordering::Relaxed)
    }

    pub fn undeliverable(&self) -> u64 {
        self.undeliverable.load(Ordering::Relaxed)
    }
}

pub struct SecurityMonitor {
    identity: ActorId,
    policies: PolicyStore,
    registry: Arc<MailboxRegistry>,
    stats: Arc<MonitorStats>,
}

impl SecurityMonitor {
    pub fn new(
        identity: impl Into<ActorId>,
        policies: PolicyStore,
        registry: Arc<MailboxRegistry>,
    ) -> Self {
        Self {
            identity: identity.into(),
            policies,
            registry,
            stats: Arc::new(MonitorStats::default()),
        }
    }

    pub fn identity(&self) -> &ActorId {
        &self.identity
    }

    /// Handle to the live policy table.
    pub fn policies(&self) -> PolicyStore {
        self.policies.clone()
    }

    pub fn stats(&self) -> Arc<MonitorStats> {
        self.stats.clone()
    }

    pub fn set_security_policies(&self, policies: Vec<SecurityPolicy>) {
        let previous = self.policies.replace(policies);
        info!(
            monitor = %self.identity,
            previous = previous.len(),
            current = self.policies.len(),
            "Security policies replaced"
        );
    }

    /// Authorization test. Starts from deny; only an exact triple match
    /// flips it.
    pub fn check_event(&self, event: &Event) -> bool {
        self.policies.permits(event)
    }

    /// Authorizes `event` and forwards it verbatim to its destination.
    ///
    /// # Errors
    ///
    /// - [`MonitorError::Unauthorized`] when no policy matches. The event is dropped.
    /// - [`MonitorError::Undeliverable`] when the destination cannot be resolved
    ///   or has stopped. The event is dropped, not retried.
    pub fn mediate(&self, event: Event) -> MonitorResult<()> {
        if !self.check_event(&event) {
            self.stats.denied.fetch_add(1, Ordering::Relaxed);
            MONITOR_EVENTS_DENIED
                .with_label_values(&denial_labels(&event))
                .inc();
            return Err(MonitorError::Unauthorized {
                sender: event.source,
                destination: event.destination,
                operation: event.operation,
            });
        }

        let destination = event.destination.clone();
        match self.registry.deliver(event) {
            Ok(()) => {
                self.stats.forwarded.fetch_add(1, Ordering::Relaxed);
                MONITOR_EVENTS_AUTHORIZED.inc();
                Ok(())
            }
            Err(reason) => {
                self.stats.undeliverable.fetch_add(1, Ordering::Relaxed);
                Err(MonitorError::Undeliverable {
                    destination,
                    reason,
                })
            }
        }
    }
}

/// Metric labels for a denied event, folded onto a fixed set of values.
///
/// Senders outside the deployment and unknown operation tags share one bucket
/// each, so forged traffic cannot grow the series count.
fn denial_labels(event: &Event) -> [&str; 2] {
    let source = names::ALL
        .iter()
        .copied()
        .find(|name| event.source == *name)
        .unwrap_or("unknown");
    let operation = match &event.operation {
        Operation::Other(_) => "other",
        known => known.as_str(),
    };
    [source, operation]
}
