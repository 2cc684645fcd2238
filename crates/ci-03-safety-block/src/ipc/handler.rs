//! Mailbox handler for the safety block
//!
//! Only the declared operation set reaches the state machine. Rejections of
//! unsafe requests are logged by the service and are not handler failures.

use async_trait::async_trait;
use shared_bus::{ActuationSink, Actor};
use shared_types::{ActorId, ControlEvent, ControlOperation, Event, Operation};
use tokio::sync::watch;
use tracing::warn;

use crate::error::SafetyError;
use crate::service::{SafetyBlock, SafetyStatus};

pub struct SafetyBlockActor<A: ActuationSink> {
    name: ActorId,
    safety: SafetyBlock<A>,
    status: watch::Sender<SafetyStatus>,
}

impl<A: ActuationSink + 'static> SafetyBlockActor<A> {
    pub fn new(name: impl Into<ActorId>, safety: SafetyBlock<A>) -> Self {
        let (status, _) = watch::channel(safety.status());
        Self {
            name: name.into(),
            safety,
            status,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SafetyStatus> {
        self.status.subscribe()
    }

    fn dispatch(&mut self, event: Event) -> Result<(), SafetyError> {
        match event.operation {
            Operation::SetMission => self.safety.set_mission(event.parameters.into_mission()?),
            Operation::SetSpeed => self
                .safety
                .set_speed(event.parameters.as_speed()?)
                .map(|_| ()),
            Operation::SetDirection => self
                .safety
                .set_direction(event.parameters.as_direction()?)
                .map(|_| ()),
            Operation::PositionUpdate => {
                self.safety.position_update(event.parameters.as_position()?);
                Ok(())
            }
            Operation::LockCargo => self.safety.lock_cargo(),
            Operation::ReleaseCargo => self.safety.release_cargo(),
            other => {
                warn!(operation = %other, source = %event.source, "Operation outside the declared set");
                Ok(())
            }
        }
    }

    fn publish(&self) {
        self.status.send_replace(self.safety.status());
    }
}

#[async_trait]
impl<A: ActuationSink + 'static> Actor for SafetyBlockActor<A> {
    type Error = SafetyError;

    fn name(&self) -> &ActorId {
        &self.name
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), SafetyError> {
        let result = self.dispatch(event);
        self.publish();
        match result {
            Err(e) if e.is_rejection() => Ok(()),
            other => other,
        }
    }

    async fn handle_control(&mut self, control: ControlEvent) -> Result<(), SafetyError> {
        let result = match control.operation {
            ControlOperation::EmergencyStop => self.safety.emergency_stop(),
            ControlOperation::Stop => Ok(()),
        };
        self.publish();
        result
    }
}
