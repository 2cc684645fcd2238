use serde::{Deserialize, Serialize};
use shared_bus::Delivery;
use shared_types::{names, ActorId};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Components address each other straight; no monitor, no safety block.
    Direct,
    /// Everything that can command motion or cargo is mediated and validated.
    #[default]
    Hardened,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown topology '{0}', expected 'direct' or 'hardened'")]
pub struct UnknownTopology(pub String);

impl Topology {
    pub fn is_hardened(self) -> bool {
        matches!(self, Self::Hardened)
    }

    /// How navigation and the gateway reach their consumers.
    pub fn fan_out(self) -> Delivery {
        match self {
            Self::Direct => Delivery::Direct,
            Self::Hardened => Delivery::mediated(names::SECURITY),
        }
    }

    /// Recipients of `set_mission` and `position_update`.
    pub fn mission_consumers(self) -> Vec<ActorId> {
        match self {
            Self::Direct => vec![names::CONTROL.into()],
            Self::Hardened => vec![names::CONTROL.into(), names::SAFETY.into()],
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Hardened => f.write_str("hardened"),
        }
    }
}

impl FromStr for Topology {
    type Err = UnknownTopology;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "baseline" => Ok(Self::Direct),
            "hardened" | "secure" => Ok(Self::Hardened),
            _ => Err(UnknownTopology(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Direct".parse::<Topology>(), Ok(Topology::Direct));
        assert_eq!(" hardened ".parse::<Topology>(), Ok(Topology::Hardened));
        assert!("mesh".parse::<Topology>().is_err());
        assert_eq!(Topology::Hardened.to_string(), "hardened");
    }

    #[test]
    fn test_consumers_follow_topology() {
        assert_eq!(Topology::Direct.mission_consumers().len(), 1);
        assert_eq!(Topology::Direct.fan_out(), Delivery::Direct);
        assert_eq!(
            Topology::Hardened.mission_consumers(),
            vec![ActorId::from(names::CONTROL), ActorId::from(names::SAFETY)]
        );
        assert_eq!(Topology::Hardened.fan_out(), Delivery::mediated(names::SECURITY));
    }
}
