//! # Mission Entities
//!
//! Geographic points, speed limits and the mission that bundles them. A
//! mission is an immutable payload: every consumer derives its own
//! [`crate::Route`] from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the Earth's surface, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Speed limit that takes effect once the route reaches `waypoint_index`.
///
/// Limits are sparse: a limit holds for every following segment until another
/// limit overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedLimit {
    pub waypoint_index: usize,
    /// Limit in km/h.
    pub speed_limit: f64,
}

impl SpeedLimit {
    pub const fn new(waypoint_index: usize, speed_limit: f64) -> Self {
        Self {
            waypoint_index,
            speed_limit,
        }
    }
}

/// Flight plan handed from the mission planner to the control loops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub home: GeoPoint,
    pub waypoints: Vec<GeoPoint>,
    pub speed_limits: Vec<SpeedLimit>,
    /// Carried through the system but not enforced by any component.
    pub armed: bool,
}

impl Mission {
    pub fn new(home: GeoPoint, waypoints: Vec<GeoPoint>, speed_limits: Vec<SpeedLimit>) -> Self {
        Self {
            home,
            waypoints,
            speed_limits,
            armed: false,
        }
    }

    pub fn armed(mut self, armed: bool) -> Self {
        self.armed = armed;
        self
    }
}
