use async_trait::async_trait;
use shared_bus::{Actor, Delivery, Outbox};
use shared_types::{names, ActorId, Event, Mission, Operation, Payload};
use tracing::{debug, info, warn};

use crate::error::GatewayError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub consumers: Vec<ActorId>,
    pub delivery: Delivery,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            consumers: vec![names::CONTROL.into()],
            delivery: Delivery::Direct,
        }
    }
}

pub struct CommunicationGateway {
    outbox: Outbox,
    config: GatewayConfig,
    mission: Option<Mission>,
}

impl CommunicationGateway {
    pub fn new(outbox: Outbox, config: GatewayConfig) -> Self {
        Self {
            outbox,
            config,
            mission: None,
        }
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    fn accept(&mut self, mission: Mission) -> Result<(), GatewayError> {
        debug!(waypoints = mission.waypoints.len(), "New mission received");
        self.mission = Some(mission.clone());
        self.outbox.broadcast(
            &self.config.delivery,
            &self.config.consumers,
            Operation::SetMission,
            Payload::Mission(mission),
        )?;
        info!(consumers = self.config.consumers.len(), "Mission forwarded");
        Ok(())
    }
}

#[async_trait]
impl Actor for CommunicationGateway {
    type Error = GatewayError;

    fn name(&self) -> &ActorId {
        self.outbox.identity()
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), GatewayError> {
        match event.operation {
            Operation::SetMission => self.accept(event.parameters.into_mission()?),
            other => {
                warn!(operation = %other, source = %event.source, "Unhandled operation");
                Ok(())
            }
        }
    }
}
