//! Fleet-management egress.
//!
//! Registered as `planner.mqtt` and `sitl.mqtt`. Each `post_mission` and
//! `post_telemetry` event is rendered to the JSON record a fleet-management
//! broker would receive and written to the log. The broker connection itself
//! is not part of the vehicle.

use async_trait::async_trait;
use serde::Serialize;
use shared_bus::Actor;
use shared_types::{ActorId, Event, Operation, Payload, PayloadError};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapters::wpl::render_wpl;

/// Fixed-point scale of telemetry coordinates.
const COORD_SCALE: f64 = 1e7;

#[derive(Debug, Error)]
pub enum EgressError {
    #[error("Malformed egress event: {0}")]
    Payload(#[from] PayloadError),

    #[error("Cannot encode egress record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "topic", rename_all = "snake_case")]
pub enum EgressRecord {
    Mission {
        id: String,
        mission_str: String,
    },
    Telemetry {
        id: String,
        lat: i64,
        lon: i64,
        azimuth: f64,
        speed: f64,
    },
}

impl EgressRecord {
    /// Record for an egress event, `None` for operations the egress ignores.
    pub fn from_event(car_id: &str, event: &Event) -> Result<Option<Self>, EgressError> {
        let record = match event.operation {
            Operation::PostMission => Self::Mission {
                id: car_id.to_string(),
                mission_str: render_wpl(event.parameters.as_mission()?),
            },
            Operation::PostTelemetry => {
                let position = event.parameters.as_position()?;
                let (speed, azimuth) = match &event.extra_parameters {
                    Some(Payload::Motion {
                        speed_kmh,
                        bearing_deg,
                    }) => (*speed_kmh, *bearing_deg),
                    _ => (0.0, 0.0),
                };
                Self::Telemetry {
                    id: car_id.to_string(),
                    lat: (position.latitude * COORD_SCALE) as i64,
                    lon: (position.longitude * COORD_SCALE) as i64,
                    azimuth,
                    speed,
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(record))
    }
}

pub struct TelemetryEgress {
    name: ActorId,
    car_id: String,
    last: watch::Sender<Option<EgressRecord>>,
}

impl TelemetryEgress {
    pub fn new(name: impl Into<ActorId>, car_id: impl Into<String>) -> Self {
        let (last, _) = watch::channel(None);
        Self {
            name: name.into(),
            car_id: car_id.into(),
            last,
        }
    }

    /// Most recently published record.
    pub fn subscribe(&self) -> watch::Receiver<Option<EgressRecord>> {
        self.last.subscribe()
    }
}

#[async_trait]
impl Actor for TelemetryEgress {
    type Error = EgressError;

    fn name(&self) -> &ActorId {
        &self.name
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), EgressError> {
        let Some(record) = EgressRecord::from_event(&self.car_id, &event)? else {
            warn!(operation = %event.operation, source = %event.source, "Unhandled operation");
            return Ok(());
        };
        let json = serde_json::to_string(&record)?;
        info!(egress = %self.name, record = %json, "Published");
        self.last.send_replace(Some(record));
        Ok(())
    }
}
