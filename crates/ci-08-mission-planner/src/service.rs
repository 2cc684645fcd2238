use async_trait::async_trait;
use shared_bus::{Actor, Outbox};
use shared_types::{names, ActorId, Event, Mission, Operation, Payload};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::error::PlannerError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    pub gateway: ActorId,
    /// Fleet-management egress receiving `post_mission`, if present.
    pub egress: Option<ActorId>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            gateway: names::COMMUNICATION.into(),
            egress: None,
        }
    }
}

/// Cloneable handle for submitting missions to a (possibly running) planner.
#[derive(Clone, Debug)]
pub struct PlannerClient {
    outbox: Outbox,
}

impl PlannerClient {
    pub fn set_new_mission(&self, mission: Mission) -> Result<(), PlannerError> {
        debug!(waypoints = mission.waypoints.len(), armed = mission.armed, "New mission requested");
        let planner = self.outbox.identity().clone();
        self.outbox
            .post(&planner, Operation::SetMission, Payload::Mission(mission))?;
        Ok(())
    }
}

pub struct MissionPlanner {
    outbox: Outbox,
    config: PlannerConfig,
    mission: watch::Sender<Option<Mission>>,
}

impl MissionPlanner {
    pub fn new(outbox: Outbox, config: PlannerConfig) -> Self {
        let (mission, _) = watch::channel(None);
        Self {
            outbox,
            config,
            mission,
        }
    }

    pub fn client(&self) -> PlannerClient {
        PlannerClient {
            outbox: self.outbox.clone(),
        }
    }

    pub fn mission(&self) -> Option<Mission> {
        self.mission.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Mission>> {
        self.mission.subscribe()
    }

    fn take_over(&mut self, mission: Mission) -> Result<(), PlannerError> {
        self.mission.send_replace(Some(mission.clone()));
        info!("New mission set, dispatching to receivers");

        if let Some(egress) = &self.config.egress {
            // Egress loss must not block the vehicle side
            if let Err(e) =
                self.outbox
                    .post(egress, Operation::PostMission, Payload::Mission(mission.clone()))
            {
                error!(egress = %egress, error = %e, "Mission egress failed");
            }
        }

        self.outbox.post(
            &self.config.gateway,
            Operation::SetMission,
            Payload::Mission(mission),
        )?;
        info!(gateway = %self.config.gateway, "Mission sent to communication gateway");
        Ok(())
    }
}

#[async_trait]
impl Actor for MissionPlanner {
    type Error = PlannerError;

    fn name(&self) -> &ActorId {
        self.outbox.identity()
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), PlannerError> {
        match event.operation {
            Operation::SetMission => self.take_over(event.parameters.into_mission()?),
            other => {
                warn!(operation = %other, source = %event.source, "Unhandled operation");
                Ok(())
            }
        }
    }
}
