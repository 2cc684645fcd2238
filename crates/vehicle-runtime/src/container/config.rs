//! # Vehicle Configuration
//!
//! Unified configuration for every component and the run itself.
//!
//! Defaults reproduce the reference deployment; environment variables
//! override selected values. An override that does not parse is logged and
//! ignored.

use ci_02_control_system::ControlConfig;
use ci_03_safety_block::SafetyConfig;
use shared_types::{names, GeoPoint, SpeedLimit};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::wiring::Topology;

/// Complete vehicle configuration.
#[derive(Debug, Clone, Default)]
pub struct VehicleConfig {
    pub topology: Topology,
    pub components: ComponentsConfig,
    pub control: ControlConfig,
    pub safety: SafetyConfig,
    pub simulator: SimulatorConfig,
    pub mission: MissionConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Component '{component}' has a zero tick period")]
    ZeroTick { component: &'static str },

    #[error("Arrival tolerance must be positive, got {0}")]
    NonPositiveTolerance(f64),

    #[error("Safety speed ceiling must be positive, got {0}")]
    NonPositiveMaxSpeed(f64),

    #[error("Cargo weight cannot be negative, got {0}")]
    NegativeCargoWeight(f64),

    #[error("{limits} speed limits for {waypoints} waypoints")]
    TooManySpeedLimits { waypoints: usize, limits: usize },
}

/// Tick period and log verbosity of one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSettings {
    pub tick: Duration,
    /// `tracing` level for this component's crate; `None` inherits the default.
    pub log_level: Option<String>,
}

impl ComponentSettings {
    pub const fn every(tick: Duration) -> Self {
        Self {
            tick,
            log_level: None,
        }
    }
}

const FAST: Duration = Duration::from_millis(100);
const SLOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentsConfig {
    pub planner: ComponentSettings,
    pub communication: ComponentSettings,
    pub control: ComponentSettings,
    pub navigation: ComponentSettings,
    pub servos: ComponentSettings,
    pub cargo: ComponentSettings,
    pub safety: ComponentSettings,
    pub security: ComponentSettings,
    pub sitl: ComponentSettings,
    pub egress: ComponentSettings,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            planner: ComponentSettings::every(FAST),
            communication: ComponentSettings::every(SLOW),
            control: ComponentSettings::every(FAST),
            navigation: ComponentSettings::every(SLOW),
            servos: ComponentSettings::every(SLOW),
            cargo: ComponentSettings::every(SLOW),
            safety: ComponentSettings::every(SLOW),
            security: ComponentSettings::every(FAST),
            sitl: ComponentSettings::every(FAST),
            egress: ComponentSettings::every(FAST),
        }
    }
}

impl ComponentsConfig {
    /// `(actor name, log target, settings)` of every component.
    pub fn entries(&self) -> [(&'static str, &'static str, &ComponentSettings); 10] {
        [
            (names::PLANNER, "ci_08_mission_planner", &self.planner),
            (names::COMMUNICATION, "ci_07_communication_gateway", &self.communication),
            (names::CONTROL, "ci_02_control_system", &self.control),
            (names::NAVIGATION, "ci_04_navigation", &self.navigation),
            (names::SERVOS, "ci_05_servos", &self.servos),
            (names::CARGO, "ci_06_cargo_bay", &self.cargo),
            (names::SAFETY, "ci_03_safety_block", &self.safety),
            (names::SECURITY, "ci_01_security_monitor", &self.security),
            (names::SITL, "ci_09_sitl", &self.sitl),
            ("egress", "vehicle_runtime::adapters", &self.egress),
        ]
    }

    /// Per-crate filter directives for the components that set a level.
    pub fn log_directives(&self) -> Vec<(String, String)> {
        self.entries()
            .iter()
            .filter_map(|(_, target, settings)| {
                settings
                    .log_level
                    .as_ref()
                    .map(|level| (target.to_string(), level.clone()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub home: GeoPoint,
    pub car_id: String,
    /// Mirror every position answer to the telemetry egress.
    pub post_telemetry: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            home: DEMO_HOME,
            car_id: "m3".to_string(),
            post_telemetry: true,
        }
    }
}

const DEMO_HOME: GeoPoint = GeoPoint::new(63.197640, 75.453721);

#[derive(Debug, Clone, PartialEq)]
pub struct MissionConfig {
    /// WPL file; when set, its points replace `waypoints` and its first
    /// point becomes home.
    pub wpl_path: Option<PathBuf>,
    pub waypoints: Vec<GeoPoint>,
    pub speed_limits: Vec<SpeedLimit>,
    pub armed: bool,
    /// Post every new mission to the fleet-management egress.
    pub post_to_fleet: bool,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            wpl_path: None,
            waypoints: vec![
                DEMO_HOME,
                GeoPoint::new(63.198640, 75.453721),
                GeoPoint::new(63.198640, 75.456000),
                GeoPoint::new(63.197640, 75.456000),
                DEMO_HOME,
            ],
            speed_limits: vec![
                SpeedLimit::new(0, 30.0),
                SpeedLimit::new(1, 60.0),
                SpeedLimit::new(2, 60.0),
                SpeedLimit::new(3, 45.0),
            ],
            armed: true,
            post_to_fleet: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// `None` runs until interrupted.
    pub duration: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration: Some(Duration::from_secs(83)),
        }
    }
}

impl VehicleConfig {
    /// Defaults with the process environment applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Applies `CI_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("CI_TOPOLOGY") {
            match value.parse() {
                Ok(topology) => self.topology = topology,
                Err(e) => warn!(error = %e, "Ignoring CI_TOPOLOGY"),
            }
        }
        if let Some(path) = lookup("CI_MISSION_FILE") {
            info!(path = %path, "Mission file from environment");
            self.mission.wpl_path = Some(PathBuf::from(path));
        }
        if let Some(value) = lookup("CI_RUN_SECS") {
            match value.parse::<u64>() {
                Ok(0) => self.run.duration = None,
                Ok(secs) => self.run.duration = Some(Duration::from_secs(secs)),
                Err(e) => warn!(value = %value, error = %e, "Ignoring CI_RUN_SECS"),
            }
        }
        if let Some(value) = lookup("CI_SURPRISES") {
            match parse_flag(&value) {
                Some(enabled) => self.control.faults.enabled = enabled,
                None => warn!(value = %value, "Ignoring CI_SURPRISES"),
            }
        }
        if let Some(value) = lookup("CI_CARGO_WEIGHT") {
            match value.parse::<f64>() {
                Ok(weight) => self.control.cargo_weight = weight,
                Err(e) => warn!(value = %value, error = %e, "Ignoring CI_CARGO_WEIGHT"),
            }
        }
        if let Some(car_id) = lookup("CI_CAR_ID") {
            self.simulator.car_id = car_id;
        }
        if let Some(value) = lookup("CI_FLEET_EGRESS") {
            match parse_flag(&value) {
                Some(enabled) => {
                    self.simulator.post_telemetry = enabled;
                    self.mission.post_to_fleet = enabled;
                }
                None => warn!(value = %value, "Ignoring CI_FLEET_EGRESS"),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (component, _, settings) in self.components.entries() {
            if settings.tick.is_zero() {
                return Err(ConfigError::ZeroTick { component });
            }
        }
        for tolerance in [self.control.arrival_tolerance_m, self.safety.arrival_tolerance_m] {
            if tolerance <= 0.0 {
                return Err(ConfigError::NonPositiveTolerance(tolerance));
            }
        }
        if self.safety.max_speed_kmh <= 0.0 {
            return Err(ConfigError::NonPositiveMaxSpeed(self.safety.max_speed_kmh));
        }
        if self.control.cargo_weight < 0.0 {
            return Err(ConfigError::NegativeCargoWeight(self.control.cargo_weight));
        }
        // File-based missions are checked once imported
        if self.mission.wpl_path.is_none()
            && self.mission.speed_limits.len() > self.mission.waypoints.len()
        {
            return Err(ConfigError::TooManySpeedLimits {
                waypoints: self.mission.waypoints.len(),
                limits: self.mission.speed_limits.len(),
            });
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
