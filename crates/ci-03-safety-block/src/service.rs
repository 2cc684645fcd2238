//! Safety Block - clamping, vetoes and the emergency-stop latch

use serde::Serialize;
use shared_bus::ActuationSink;
use shared_types::{geo, GeoPoint, Mission, Route};
use tracing::{debug, error, info, warn};

use crate::error::{SafetyError, SafetyResult};
use autonomy_telemetry::metric_inc;
use autonomy_telemetry::metrics::{ROUTE_WAYPOINTS_REACHED, SAFETY_REJECTIONS, SAFETY_SPEED_CLAMPS};

/// Safety configuration
#[derive(Clone, Debug, PartialEq)]
pub struct SafetyConfig {
    /// Speed ceiling, km/h
    pub max_speed_kmh: f64,
    /// Declared turn limit, degrees. Not enforced.
    pub max_turn_angle_deg: f64,
    /// Distance at which the next point counts as reached, metres
    pub arrival_tolerance_m: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_speed_kmh: 60.0,
            max_turn_angle_deg: 45.0,
            arrival_tolerance_m: 5.0,
        }
    }
}

/// What happened to an accepted speed request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpeedVerdict {
    Accepted(f64),
    Clamped { requested: f64, applied: f64 },
}

impl SpeedVerdict {
    /// Speed that was stored and forwarded.
    pub fn applied(&self) -> f64 {
        match *self {
            Self::Accepted(speed) => speed,
            Self::Clamped { applied, .. } => applied,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SafetyStatus {
    pub mission_loaded: bool,
    pub current_index: Option<usize>,
    pub route_finished: bool,
    pub position: Option<GeoPoint>,
    pub speed_kmh: f64,
    pub direction_deg: f64,
    pub emergency_stop: bool,
}

pub struct SafetyBlock<A: ActuationSink> {
    config: SafetyConfig,
    actuation: A,
    mission: Option<Mission>,
    route: Option<Route>,
    position: Option<GeoPoint>,
    speed_kmh: f64,
    direction_deg: f64,
    emergency_stop: bool,
}

impl<A: ActuationSink> SafetyBlock<A> {
    pub fn new(config: SafetyConfig, actuation: A) -> Self {
        Self {
            config,
            actuation,
            mission: None,
            route: None,
            position: None,
            speed_kmh: 0.0,
            direction_deg: 0.0,
            emergency_stop: false,
        }
    }

    pub fn set_mission(&mut self, mission: Mission) -> SafetyResult<()> {
        let route = Route::from_mission(&mission)?;
        info!(waypoints = route.len(), "Safety route set");
        self.mission = Some(mission);
        self.route = Some(route);
        Ok(())
    }

    /// Stores the position and advances the safety block's own route copy.
    pub fn position_update(&mut self, position: GeoPoint) {
        debug!(%position, "Position update");
        self.position = Some(position);
        let Some(route) = self.route.as_mut() else {
            return;
        };
        if route.is_finished() {
            return;
        }
        if route.remaining_distance_to_next_point(position) <= self.config.arrival_tolerance_m {
            route.move_to_next_point();
            metric_inc!(ROUTE_WAYPOINTS_REACHED, &["safety"]);
            if route.is_finished() {
                info!("Route completed");
            } else {
                info!(index = route.current_index(), "Segment completed");
            }
        }
    }

    fn reject(&self, error: SafetyError, reason: &str) -> SafetyError {
        metric_inc!(SAFETY_REJECTIONS, &[reason]);
        warn!(error = %error, "Actuation request rejected");
        error
    }

    /// Validates, stores and forwards a speed request.
    ///
    /// Values above the ceiling are never let through: the ceiling itself is
    /// stored and forwarded instead. NaN and infinities are rejected outright.
    pub fn set_speed(&mut self, requested: f64) -> SafetyResult<SpeedVerdict> {
        if self.emergency_stop {
            return Err(self.reject(
                SafetyError::EmergencyStopActive {
                    command: "set_speed",
                },
                "emergency_stop",
            ));
        }
        if !requested.is_finite() {
            return Err(self.reject(SafetyError::NonFiniteSpeed(requested), "non_finite_speed"));
        }
        if requested < 0.0 {
            return Err(self.reject(SafetyError::NegativeSpeed(requested), "negative_speed"));
        }

        let verdict = if requested > self.config.max_speed_kmh {
            metric_inc!(SAFETY_SPEED_CLAMPS);
            error!(
                requested,
                ceiling = self.config.max_speed_kmh,
                "Speed above ceiling, clamping"
            );
            SpeedVerdict::Clamped {
                requested,
                applied: self.config.max_speed_kmh,
            }
        } else {
            SpeedVerdict::Accepted(requested)
        };

        self.speed_kmh = verdict.applied();
        self.actuation.send_speed(self.speed_kmh)?;
        Ok(verdict)
    }

    /// Normalizes, checks and forwards a direction request.
    pub fn set_direction(&mut self, requested: f64) -> SafetyResult<f64> {
        if self.emergency_stop {
            return Err(self.reject(
                SafetyError::EmergencyStopActive {
                    command: "set_direction",
                },
                "emergency_stop",
            ));
        }
        if !requested.is_finite() {
            return Err(self.reject(
                SafetyError::NonFiniteDirection(requested),
                "non_finite_direction",
            ));
        }
        let direction = geo::normalize_deg(requested);
        if !self.check_route_safety(direction) {
            error!(direction, "Direction leads outside the safe zone");
            return Err(self.reject(SafetyError::UnsafeDirection(direction), "unsafe_direction"));
        }
        self.direction_deg = direction;
        self.actuation.send_direction(direction)?;
        Ok(direction)
    }

    /// Geofencing hook. Every direction is currently considered safe.
    pub fn check_route_safety(&self, _direction_deg: f64) -> bool {
        true
    }

    /// Latches the emergency stop and forwards a zero speed.
    pub fn emergency_stop(&mut self) -> SafetyResult<()> {
        self.emergency_stop = true;
        self.speed_kmh = 0.0;
        error!("Emergency stop activated");
        self.actuation.send_speed(0.0)?;
        Ok(())
    }

    pub fn lock_cargo(&self) -> SafetyResult<()> {
        self.actuation.send_cargo_lock()?;
        Ok(())
    }

    pub fn release_cargo(&self) -> SafetyResult<()> {
        self.actuation.send_cargo_release()?;
        Ok(())
    }

    pub fn max_speed_kmh(&self) -> f64 {
        self.config.max_speed_kmh
    }

    /// Declared turn limit; no transition consults it yet.
    pub fn max_turn_angle_deg(&self) -> f64 {
        self.config.max_turn_angle_deg
    }

    pub fn is_emergency_stopped(&self) -> bool {
        self.emergency_stop
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    pub fn direction_deg(&self) -> f64 {
        self.direction_deg
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn status(&self) -> SafetyStatus {
        SafetyStatus {
            mission_loaded: self.mission.is_some(),
            current_index: self.route.as_ref().map(Route::current_index),
            route_finished: self.route.as_ref().is_some_and(Route::is_finished),
            position: self.position,
            speed_kmh: self.speed_kmh,
            direction_deg: self.direction_deg,
            emergency_stop: self.emergency_stop,
        }
    }
}
