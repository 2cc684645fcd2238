//! Control System - route following and command generation

use serde::Serialize;
use shared_bus::ActuationSink;
use shared_types::{geo, GeoPoint, Mission, Route};
use tracing::{debug, error, info, warn};

use crate::error::{ControlError, ControlResult};
use autonomy_telemetry::metrics::{CONTROL_COMMANDS_SUPPRESSED, ROUTE_WAYPOINTS_REACHED};

const KMH_PER_MPS: f64 = 3.6;

/// Deliberate misbehaviour used to exercise the safety block.
#[derive(Clone, Debug, PartialEq)]
pub struct FaultInjection {
    pub enabled: bool,
    /// Route index at which the bearing is turned around
    pub bearing_flip_index: usize,
    /// Route index at which the commanded speed is inflated
    pub speed_boost_index: usize,
    /// Amount added to the commanded speed, km/h
    pub speed_boost_kmh: f64,
    /// Route index on arrival at which the cargo is released
    pub cargo_release_index: usize,
}

impl Default for FaultInjection {
    fn default() -> Self {
        Self {
            enabled: false,
            bearing_flip_index: 1,
            speed_boost_index: 2,
            speed_boost_kmh: 100.0,
            cargo_release_index: 3,
        }
    }
}

/// Control configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ControlConfig {
    /// Distance to the next point at which it counts as reached, metres
    pub arrival_tolerance_m: f64,
    /// Above this cargo weight no motion command is emitted
    pub max_cargo_weight: f64,
    /// Cargo weight at start-up
    pub cargo_weight: f64,
    pub faults: FaultInjection,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            arrival_tolerance_m: 5.0,
            max_cargo_weight: 5.0,
            cargo_weight: 0.0,
            faults: FaultInjection::default(),
        }
    }
}

/// Outcome of one `recalc_control` pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlDecision {
    /// Distance to the next point measured before any advance, metres
    pub distance_to_next_m: f64,
    pub advanced: bool,
    pub speed_kmh: f64,
    pub direction_deg: f64,
    /// False when the cargo interlock withheld the commands
    pub emitted: bool,
}

/// Observable snapshot of the control state.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ControlStatus {
    pub mission_loaded: bool,
    pub current_index: Option<usize>,
    pub route_finished: bool,
    pub position: Option<GeoPoint>,
    pub speed_kmh: f64,
    pub direction_deg: f64,
    pub cargo_weight: f64,
}

pub struct ControlSystem<A: ActuationSink> {
    config: ControlConfig,
    actuation: A,
    mission: Option<Mission>,
    route: Option<Route>,
    position: Option<GeoPoint>,
    /// m/s
    speed: f64,
    direction_deg: f64,
    cargo_weight: f64,
}

impl<A: ActuationSink> ControlSystem<A> {
    /// # Errors
    ///
    /// - [`ControlError::NegativeCargoWeight`] for a negative initial cargo weight.
    pub fn new(config: ControlConfig, actuation: A) -> ControlResult<Self> {
        let cargo_weight = config.cargo_weight;
        let mut control = Self {
            config,
            actuation,
            mission: None,
            route: None,
            position: None,
            speed: 0.0,
            direction_deg: 0.0,
            cargo_weight: 0.0,
        };
        control.set_cargo_weight(cargo_weight)?;
        Ok(control)
    }

    pub fn enable_surprises(&mut self) {
        warn!("Fault injection enabled");
        self.config.faults.enabled = true;
    }

    pub fn surprises_enabled(&self) -> bool {
        self.config.faults.enabled
    }

    pub fn set_cargo_weight(&mut self, weight: f64) -> ControlResult<()> {
        if weight < 0.0 {
            return Err(ControlError::NegativeCargoWeight(weight));
        }
        self.cargo_weight = weight;
        if self.is_overloaded() {
            warn!(
                weight,
                limit = self.config.max_cargo_weight,
                "Cargo overweight, motion commands suppressed"
            );
        }
        Ok(())
    }

    pub fn is_overloaded(&self) -> bool {
        self.cargo_weight > self.config.max_cargo_weight
    }

    /// Replaces mission and route, then locks the cargo.
    ///
    /// An invalid mission is refused and the previous one stays active.
    pub fn set_mission(&mut self, mission: Mission) -> ControlResult<()> {
        let route = Route::from_mission(&mission)?;
        if !mission.armed {
            warn!("Mission accepted while not armed");
        }
        info!(
            waypoints = route.len(),
            speed_limits = mission.speed_limits.len(),
            "New mission set"
        );
        self.mission = Some(mission);
        self.route = Some(route);
        self.actuation.send_cargo_lock()?;
        Ok(())
    }

    /// Stores the position and, with a route loaded, recomputes control.
    pub fn position_update(&mut self, position: GeoPoint) -> ControlResult<Option<ControlDecision>> {
        self.position = Some(position);
        if self.route.is_none() {
            return Ok(None);
        }
        self.recalc_control()
    }

    /// One pass of the control algorithm. `None` when there is nothing to do.
    pub fn recalc_control(&mut self) -> ControlResult<Option<ControlDecision>> {
        let (Some(route), Some(position)) = (self.route.as_mut(), self.position) else {
            return Ok(None);
        };
        if route.is_finished() {
            return Ok(None);
        }
        let faults = &self.config.faults;

        let distance = route.remaining_distance_to_next_point(position);
        let advanced = distance <= self.config.arrival_tolerance_m;
        // Cargo commands never hold back the motion commands below.
        let mut cargo_failure = None;
        if advanced {
            route.move_to_next_point();
            ROUTE_WAYPOINTS_REACHED.with_label_values(&["control"]).inc();

            if faults.enabled && route.current_index() == faults.cargo_release_index {
                warn!(index = route.current_index(), "Injected fault: cargo release");
                if let Err(e) = self.actuation.send_cargo_release() {
                    error!(error = %e, "Cargo release not delivered");
                    cargo_failure.get_or_insert(e);
                }
            }

            if route.is_finished() {
                info!("Route completed, releasing cargo");
                if let Err(e) = self.actuation.send_cargo_release() {
                    error!(error = %e, "Cargo release not delivered");
                    cargo_failure.get_or_insert(e);
                }
            } else {
                info!(index = route.current_index(), "Segment completed");
            }
        }

        let mut speed_kmh = route.calculate_speed();
        if faults.enabled && route.current_index() == faults.speed_boost_index {
            speed_kmh += faults.speed_boost_kmh;
        }

        let direction_deg = match route.next_point() {
            None => 0.0,
            Some(next) => {
                let bearing = geo::initial_bearing_deg(position, next);
                if faults.enabled && route.current_index() == faults.bearing_flip_index {
                    (bearing + 180.0) % 360.0
                } else {
                    bearing
                }
            }
        };

        self.set_speed(speed_kmh)?;
        self.set_direction(direction_deg)?;

        debug!(
            distance_m = distance as u64,
            speed_kmh,
            direction_deg,
            "Control recalculated"
        );

        let emitted = if self.is_overloaded() {
            CONTROL_COMMANDS_SUPPRESSED.inc();
            warn!(
                weight = self.cargo_weight,
                "Vehicle overloaded, speed and direction withheld"
            );
            false
        } else {
            self.actuation.send_speed(speed_kmh)?;
            self.actuation.send_direction(direction_deg)?;
            true
        };

        if let Some(e) = cargo_failure {
            return Err(e.into());
        }
        Ok(Some(ControlDecision {
            distance_to_next_m: distance,
            advanced,
            speed_kmh,
            direction_deg,
            emitted,
        }))
    }

    fn set_speed(&mut self, speed_kmh: f64) -> ControlResult<()> {
        if speed_kmh < 0.0 {
            return Err(ControlError::NegativeSpeed(speed_kmh));
        }
        if (self.speed_kmh() - speed_kmh).abs() >= 1.0 {
            info!(new = speed_kmh, old = self.speed_kmh(), "Speed changed");
        }
        self.speed = speed_kmh / KMH_PER_MPS;
        Ok(())
    }

    fn set_direction(&mut self, direction_deg: f64) -> ControlResult<()> {
        if direction_deg < 0.0 {
            return Err(ControlError::NegativeDirection(direction_deg));
        }
        if (self.direction_deg - direction_deg).abs() >= 1.0 {
            info!(new = direction_deg, old = self.direction_deg, "Direction changed");
        }
        self.direction_deg = direction_deg;
        Ok(())
    }

    pub fn speed_mps(&self) -> f64 {
        self.speed
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed * KMH_PER_MPS
    }

    pub fn direction_deg(&self) -> f64 {
        self.direction_deg
    }

    pub fn position(&self) -> Option<GeoPoint> {
        self.position
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn status(&self) -> ControlStatus {
        ControlStatus {
            mission_loaded: self.mission.is_some(),
            current_index: self.route.as_ref().map(Route::current_index),
            route_finished: self.route.as_ref().is_some_and(Route::is_finished),
            position: self.position,
            speed_kmh: self.speed_kmh(),
            direction_deg: self.direction_deg,
            cargo_weight: self.cargo_weight,
        }
    }
}
