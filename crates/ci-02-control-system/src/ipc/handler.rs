//! Mailbox handler for the control system

use async_trait::async_trait;
use shared_bus::{ActuationSink, Actor};
use shared_types::{ActorId, Event, Operation};
use tokio::sync::watch;
use tracing::warn;

use crate::error::ControlError;
use crate::service::{ControlStatus, ControlSystem};

/// Accepts `set_mission` and `position_update`; anything else is logged and
/// skipped.
pub struct ControlSystemActor<A: ActuationSink> {
    name: ActorId,
    control: ControlSystem<A>,
    status: watch::Sender<ControlStatus>,
}

impl<A: ActuationSink + 'static> ControlSystemActor<A> {
    pub fn new(name: impl Into<ActorId>, control: ControlSystem<A>) -> Self {
        let (status, _) = watch::channel(control.status());
        Self {
            name: name.into(),
            control,
            status,
        }
    }

    /// Receiver of the state snapshot published after every event.
    pub fn subscribe(&self) -> watch::Receiver<ControlStatus> {
        self.status.subscribe()
    }

    fn dispatch(&mut self, event: Event) -> Result<(), ControlError> {
        match event.operation {
            Operation::SetMission => {
                let mission = event.parameters.into_mission()?;
                self.control.set_mission(mission)
            }
            Operation::PositionUpdate => {
                let position = event.parameters.as_position()?;
                self.control.position_update(position).map(|_| ())
            }
            other => {
                warn!(operation = %other, source = %event.source, "Unhandled operation");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl<A: ActuationSink + 'static> Actor for ControlSystemActor<A> {
    type Error = ControlError;

    fn name(&self) -> &ActorId {
        &self.name
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), ControlError> {
        let result = self.dispatch(event);
        self.status.send_replace(self.control.status());
        result
    }
}
