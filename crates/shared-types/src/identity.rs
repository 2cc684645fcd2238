//! # Actor Identities
//!
//! Every component owns exactly one mailbox, registered under a fixed name.
//! The name is passed into the component at construction rather than baked
//! into its type, so two instances of the same component can coexist.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Well-known mailbox names of the reference deployment.
pub mod names {
    pub const PLANNER: &str = "planner";
    pub const COMMUNICATION: &str = "communication";
    pub const CONTROL: &str = "control";
    pub const SENSORS: &str = "sensors";
    pub const SERVOS: &str = "servos";
    pub const NAVIGATION: &str = "navigation";
    pub const SITL: &str = "sitl";
    pub const CARGO: &str = "cargo";
    /// Telemetry egress of the simulator.
    pub const SITL_TELEMETRY: &str = "sitl.mqtt";
    /// Mission egress towards fleet management.
    pub const PLANNER_EGRESS: &str = "planner.mqtt";
    pub const SAFETY: &str = "safety";
    pub const SECURITY: &str = "security";

    pub const ALL: &[&str] = &[
        PLANNER,
        COMMUNICATION,
        CONTROL,
        SENSORS,
        SERVOS,
        NAVIGATION,
        SITL,
        CARGO,
        SITL_TELEMETRY,
        PLANNER_EGRESS,
        SAFETY,
        SECURITY,
    ];
}

/// Name of an actor's mailbox in the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ActorId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for ActorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ActorId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ActorId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
