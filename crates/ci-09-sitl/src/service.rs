use async_trait::async_trait;
use serde::Serialize;
use shared_bus::{Actor, Outbox};
use shared_types::{geo, names, ActorId, Event, GeoPoint, Operation, Payload};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::error::SitlError;

#[derive(Clone, Debug, PartialEq)]
pub struct SitlConfig {
    pub home: GeoPoint,
    pub car_id: String,
    /// Simulated time per tick; should match the actor's tick period.
    pub step: Duration,
    pub navigation: ActorId,
    /// Egress for `post_telemetry`, if telemetry is published.
    pub telemetry: Option<ActorId>,
}

impl Default for SitlConfig {
    fn default() -> Self {
        Self {
            home: GeoPoint::new(0.0, 0.0),
            car_id: "C1".to_string(),
            step: Duration::from_millis(100),
            navigation: names::NAVIGATION.into(),
            telemetry: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitlStatus {
    pub car_id: String,
    pub position: GeoPoint,
    pub speed_kmh: f64,
    pub bearing_deg: f64,
}

pub struct Sitl {
    outbox: Outbox,
    config: SitlConfig,
    position: GeoPoint,
    speed_kmh: f64,
    bearing_deg: f64,
    status: watch::Sender<SitlStatus>,
}

impl Sitl {
    pub fn new(outbox: Outbox, config: SitlConfig) -> Self {
        let position = config.home;
        let (status, _) = watch::channel(SitlStatus {
            car_id: config.car_id.clone(),
            position,
            speed_kmh: 0.0,
            bearing_deg: 0.0,
        });
        info!(car_id = %config.car_id, home = %position, "Simulator created");
        Self {
            outbox,
            config,
            position,
            speed_kmh: 0.0,
            bearing_deg: 0.0,
            status,
        }
    }

    pub fn car_id(&self) -> &str {
        &self.config.car_id
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn subscribe(&self) -> watch::Receiver<SitlStatus> {
        self.status.subscribe()
    }

    pub fn set_speed(&mut self, speed_kmh: f64) {
        debug!(speed_kmh, "Simulated speed");
        self.speed_kmh = speed_kmh;
        self.publish();
    }

    pub fn set_direction(&mut self, bearing_deg: f64) {
        debug!(bearing_deg, "Simulated bearing");
        self.bearing_deg = bearing_deg;
        self.publish();
    }

    /// Moves the vehicle for `elapsed` at the current speed and bearing.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.speed_kmh == 0.0 {
            return;
        }
        let distance_m = elapsed.as_secs_f64() * self.speed_kmh / 3.6;
        self.position = geo::destination(self.position, self.bearing_deg, distance_m);
        self.publish();
    }

    fn publish(&self) {
        self.status.send_replace(SitlStatus {
            car_id: self.config.car_id.clone(),
            position: self.position,
            speed_kmh: self.speed_kmh,
            bearing_deg: self.bearing_deg,
        });
    }

    fn post_position(&self) -> Result<(), SitlError> {
        let reply = self.outbox.post(
            &self.config.navigation,
            Operation::PositionUpdate,
            Payload::Position(self.position),
        );

        if let Some(telemetry) = &self.config.telemetry {
            let event = self
                .outbox
                .event(telemetry, Operation::PostTelemetry, Payload::Position(self.position))
                .with_extra(Payload::Motion {
                    speed_kmh: self.speed_kmh,
                    bearing_deg: self.bearing_deg,
                });
            if let Err(e) = self.outbox.registry().deliver(event) {
                error!(egress = %telemetry, error = %e, "Telemetry post failed");
            }
        }

        reply.map_err(SitlError::from)
    }
}

#[async_trait]
impl Actor for Sitl {
    type Error = SitlError;

    fn name(&self) -> &ActorId {
        self.outbox.identity()
    }

    async fn on_tick(&mut self) -> Result<(), SitlError> {
        self.advance(self.config.step);
        Ok(())
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), SitlError> {
        match event.operation {
            Operation::PostPosition => self.post_position(),
            Operation::SetSpeed => {
                self.set_speed(event.parameters.as_speed()?);
                Ok(())
            }
            Operation::SetDirection => {
                self.set_direction(event.parameters.as_direction()?);
                Ok(())
            }
            other => {
                warn!(operation = %other, source = %event.source, "Unhandled operation");
                Ok(())
            }
        }
    }
}
