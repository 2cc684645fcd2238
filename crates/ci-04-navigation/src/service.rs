//! Navigation System actor

use async_trait::async_trait;
use shared_bus::{Actor, Delivery, Outbox};
use shared_types::{names, ActorId, Event, GeoPoint, Operation, Payload};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{NavigationError, NavigationResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Mailbox answering `post_position`
    pub position_source: ActorId,
    /// Recipients of every position update
    pub consumers: Vec<ActorId>,
    pub delivery: Delivery,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            position_source: names::SITL.into(),
            consumers: vec![names::CONTROL.into()],
            delivery: Delivery::Direct,
        }
    }
}

pub struct NavigationSystem {
    outbox: Outbox,
    config: NavigationConfig,
    position: watch::Sender<Option<GeoPoint>>,
}

impl NavigationSystem {
    pub fn new(outbox: Outbox, config: NavigationConfig) -> Self {
        let (position, _) = watch::channel(None);
        Self {
            outbox,
            config,
            position,
        }
    }

    /// Last position received from the source.
    pub fn subscribe(&self) -> watch::Receiver<Option<GeoPoint>> {
        self.position.subscribe()
    }

    fn request_coordinates(&self) -> NavigationResult<()> {
        self.outbox.post(
            &self.config.position_source,
            Operation::PostPosition,
            Payload::Empty,
        )?;
        Ok(())
    }

    fn publish(&self, position: GeoPoint) -> NavigationResult<()> {
        debug!(%position, "New coordinates");
        self.position.send_replace(Some(position));
        self.outbox.broadcast(
            &self.config.delivery,
            &self.config.consumers,
            Operation::PositionUpdate,
            Payload::Position(position),
        )?;
        Ok(())
    }
}

#[async_trait]
impl Actor for NavigationSystem {
    type Error = NavigationError;

    fn name(&self) -> &ActorId {
        self.outbox.identity()
    }

    async fn on_tick(&mut self) -> NavigationResult<()> {
        self.request_coordinates()
    }

    async fn handle_event(&mut self, event: Event) -> NavigationResult<()> {
        match event.operation {
            Operation::PositionUpdate => self.publish(event.parameters.as_position()?),
            other => {
                warn!(operation = %other, source = %event.source, "Unhandled operation");
                Ok(())
            }
        }
    }
}
