//! # Event Envelope
//!
//! The universal wrapper for every message that crosses a mailbox.
//!
//! ## Properties
//!
//! - **Triple Authority**: `(source, destination, operation)` is the sole input
//!   to policy checks. Payloads never carry identity.
//! - **Value Semantics**: An [`Event`] is moved into the receiving mailbox;
//!   the producer keeps nothing it could mutate afterwards.
//! - **Lifecycle Separation**: [`ControlEvent`]s travel on a dedicated channel so
//!   a backlog of business events can never starve a `stop` request.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;
use uuid::Uuid;

use crate::entities::{GeoPoint, Mission};
use crate::errors::PayloadError;
use crate::identity::ActorId;

// =============================================================================
// OPERATIONS
// =============================================================================

/// Operation tag of an [`Event`].
///
/// Serialized as its snake_case wire name. Tags this build does not know are
/// kept verbatim in [`Operation::Other`] so handlers can log and skip them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    SetMission,
    PositionUpdate,
    SetSpeed,
    SetDirection,
    LockCargo,
    ReleaseCargo,
    PostMission,
    PostTelemetry,
    PostPosition,
    Other(String),
}

impl Operation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SetMission => "set_mission",
            Self::PositionUpdate => "position_update",
            Self::SetSpeed => "set_speed",
            Self::SetDirection => "set_direction",
            Self::LockCargo => "lock_cargo",
            Self::ReleaseCargo => "release_cargo",
            Self::PostMission => "post_mission",
            Self::PostTelemetry => "post_telemetry",
            Self::PostPosition => "post_position",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for Operation {
    fn from(tag: &str) -> Self {
        match tag {
            "set_mission" => Self::SetMission,
            "position_update" => Self::PositionUpdate,
            "set_speed" => Self::SetSpeed,
            "set_direction" => Self::SetDirection,
            "lock_cargo" => Self::LockCargo,
            "release_cargo" => Self::ReleaseCargo,
            "post_mission" => Self::PostMission,
            "post_telemetry" => Self::PostTelemetry,
            "post_position" => Self::PostPosition,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Operation {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<Operation> for String {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Operation-specific parameters of an [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    Empty,
    Mission(Mission),
    Position(GeoPoint),
    /// Speed in km/h.
    Speed(f64),
    /// Bearing in degrees.
    Direction(f64),
    /// Simulator telemetry extras.
    Motion { speed_kmh: f64, bearing_deg: f64 },
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Mission(_) => "mission",
            Self::Position(_) => "position",
            Self::Speed(_) => "speed",
            Self::Direction(_) => "direction",
            Self::Motion { .. } => "motion",
        }
    }

    fn mismatch(&self, expected: &'static str) -> PayloadError {
        PayloadError::Mismatch {
            expected,
            actual: self.kind(),
        }
    }

    pub fn as_mission(&self) -> Result<&Mission, PayloadError> {
        match self {
            Self::Mission(mission) => Ok(mission),
            other => Err(other.mismatch("mission")),
        }
    }

    pub fn into_mission(self) -> Result<Mission, PayloadError> {
        match self {
            Self::Mission(mission) => Ok(mission),
            other => Err(other.mismatch("mission")),
        }
    }

    pub fn as_position(&self) -> Result<GeoPoint, PayloadError> {
        match self {
            Self::Position(point) => Ok(*point),
            other => Err(other.mismatch("position")),
        }
    }

    /// Numeric value of a speed payload. Directions are rejected.
    pub fn as_speed(&self) -> Result<f64, PayloadError> {
        match self {
            Self::Speed(value) => Ok(*value),
            other => Err(other.mismatch("speed")),
        }
    }

    pub fn as_direction(&self) -> Result<f64, PayloadError> {
        match self {
            Self::Direction(value) => Ok(*value),
            other => Err(other.mismatch("direction")),
        }
    }
}

// =============================================================================
// EVENT
// =============================================================================

/// A business message between two actors.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Correlates log lines across hops; the monitor forwards it unchanged.
    pub id: Uuid,
    pub source: ActorId,
    /// Logical recipient. In the hardened topology the event is first pushed
    /// into the monitor's mailbox with this field already set.
    pub destination: ActorId,
    pub operation: Operation,
    pub parameters: Payload,
    pub extra_parameters: Option<Payload>,
    /// Reserved; no component signs or verifies events.
    #[serde_as(as = "Option<Bytes>")]
    pub signature: Option<Vec<u8>>,
}

impl Event {
    pub fn new(
        source: impl Into<ActorId>,
        destination: impl Into<ActorId>,
        operation: Operation,
        parameters: Payload,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            destination: destination.into(),
            operation,
            parameters,
            extra_parameters: None,
            signature: None,
        }
    }

    pub fn with_extra(mut self, extra: Payload) -> Self {
        self.extra_parameters = Some(extra);
        self
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}",
            self.source, self.destination, self.operation
        )
    }
}

// =============================================================================
// LIFECYCLE CONTROL
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlOperation {
    /// Leave the tick loop after the current iteration.
    Stop,
    /// Latch the safety block's emergency stop. Other actors ignore it.
    EmergencyStop,
}

/// Lifecycle command delivered on an actor's control channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlEvent {
    pub operation: ControlOperation,
}

impl ControlEvent {
    pub const fn stop() -> Self {
        Self {
            operation: ControlOperation::Stop,
        }
    }

    pub const fn emergency_stop() -> Self {
        Self {
            operation: ControlOperation::EmergencyStop,
        }
    }

    pub fn is_stop(&self) -> bool {
        self.operation == ControlOperation::Stop
    }
}
