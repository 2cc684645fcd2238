use async_trait::async_trait;
use serde::Serialize;
use shared_bus::{Actor, Outbox};
use shared_types::{names, ActorId, Event, Operation, Payload};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::ServoError;

/// Values most recently applied to the drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ServoStatus {
    pub speed_kmh: f64,
    pub direction_deg: f64,
}

pub struct Servos {
    outbox: Outbox,
    drive: ActorId,
    status: watch::Sender<ServoStatus>,
}

impl Servos {
    pub fn new(outbox: Outbox) -> Self {
        Self::with_drive(outbox, names::SITL)
    }

    pub fn with_drive(outbox: Outbox, drive: impl Into<ActorId>) -> Self {
        let (status, _) = watch::channel(ServoStatus::default());
        Self {
            outbox,
            drive: drive.into(),
            status,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ServoStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> ServoStatus {
        *self.status.borrow()
    }

    fn apply_speed(&self, speed_kmh: f64) -> Result<(), ServoError> {
        info!(speed_kmh, "Speed set");
        self.status.send_modify(|s| s.speed_kmh = speed_kmh);
        self.outbox
            .post(&self.drive, Operation::SetSpeed, Payload::Speed(speed_kmh))?;
        Ok(())
    }

    fn apply_direction(&self, direction_deg: f64) -> Result<(), ServoError> {
        info!(direction_deg, "Direction set");
        self.status.send_modify(|s| s.direction_deg = direction_deg);
        self.outbox.post(
            &self.drive,
            Operation::SetDirection,
            Payload::Direction(direction_deg),
        )?;
        Ok(())
    }
}

#[async_trait]
impl Actor for Servos {
    type Error = ServoError;

    fn name(&self) -> &ActorId {
        self.outbox.identity()
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), ServoError> {
        match event.operation {
            Operation::SetSpeed => self.apply_speed(event.parameters.as_speed()?),
            Operation::SetDirection => self.apply_direction(event.parameters.as_direction()?),
            other => {
                warn!(operation = %other, source = %event.source, "Unhandled operation");
                Ok(())
            }
        }
    }
}
