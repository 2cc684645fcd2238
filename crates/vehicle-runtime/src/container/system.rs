//! # Vehicle System
//!
//! Builds every component actor, then starts them together.
//!
//! ## Lifecycle
//!
//! ```text
//! build():  validate config → load mission → register ALL mailboxes
//!           → construct actors (not yet running) → queue mission at planner
//! start():  spawn every actor
//! stop():   stop every actor → join every actor
//! ```
//!
//! Registering every mailbox before any actor runs means no component can
//! observe a half-wired system: the first event any actor sends already finds
//! its destination.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, instrument};

use ci_01_security_monitor::{MonitorStats, PolicyStore, SecurityMonitor, SecurityMonitorActor};
use ci_02_control_system::{ControlStatus, ControlSystem, ControlSystemActor};
use ci_03_safety_block::{SafetyBlock, SafetyBlockActor, SafetyStatus};
use ci_04_navigation::{NavigationConfig, NavigationSystem};
use ci_05_servos::{ServoStatus, Servos};
use ci_06_cargo_bay::{CargoBay, CargoState};
use ci_07_communication_gateway::{CommunicationGateway, GatewayConfig};
use ci_08_mission_planner::{MissionPlanner, PlannerClient, PlannerConfig};
use ci_09_sitl::{Sitl, SitlConfig, SitlStatus};
use shared_bus::{
    spawn_actor, Actor, ActorConfig, ActorHandle, ActuationSink, ActuationTargets, BusError,
    BusResult, DirectActuation, MailboxRegistry, MediatedActuation, Outbox,
};
use shared_types::{names, ActorId, ControlEvent, GeoPoint, Mission, Route, SecurityPolicy};

use crate::adapters::{EgressRecord, MissionImporter, TelemetryEgress};
use crate::container::config::{MissionConfig, VehicleConfig};
use crate::wiring::{hardened_policies, Topology};

type Launcher = Box<dyn FnOnce() -> ActorHandle + Send>;

struct PendingActor {
    name: ActorId,
    launch: Launcher,
}

/// Observation points on the running vehicle.
#[derive(Clone)]
pub struct StatusFeeds {
    pub planner: watch::Receiver<Option<Mission>>,
    pub control: watch::Receiver<ControlStatus>,
    /// Present in the hardened topology only.
    pub safety: Option<watch::Receiver<SafetyStatus>>,
    pub navigation: watch::Receiver<Option<GeoPoint>>,
    pub servos: watch::Receiver<ServoStatus>,
    pub cargo: watch::Receiver<CargoState>,
    pub vehicle: watch::Receiver<SitlStatus>,
    pub telemetry: Option<watch::Receiver<Option<EgressRecord>>>,
}

pub struct VehicleSystem {
    topology: Topology,
    registry: Arc<MailboxRegistry>,
    mission: Mission,
    pending: Vec<PendingActor>,
    handles: Vec<ActorHandle>,
    planner: PlannerClient,
    policies: Option<PolicyStore>,
    monitor_stats: Option<Arc<MonitorStats>>,
    status: StatusFeeds,
}

impl VehicleSystem {
    #[instrument(skip_all, fields(topology = %config.topology))]
    pub fn build(config: VehicleConfig) -> Result<Self> {
        config.validate().context("Invalid vehicle configuration")?;
        let mission = load_mission(&config)?;
        Route::from_mission(&mission).context("Mission cannot be followed")?;

        let topology = config.topology;
        let registry = MailboxRegistry::shared();
        let mut wiring = Wiring {
            registry: registry.clone(),
            pending: Vec::new(),
        };
        let ticks = &config.components;
        let outbox = |name: &str| Outbox::new(name, registry.clone());

        // Monitor
        let (policies, monitor_stats) = if topology.is_hardened() {
            let store = PolicyStore::new(hardened_policies());
            let monitor = SecurityMonitor::new(names::SECURITY, store.clone(), registry.clone());
            let stats = monitor.stats();
            wiring.add(SecurityMonitorActor::new(monitor), ticks.security.tick)?;
            (Some(store), Some(stats))
        } else {
            (None, None)
        };

        // Control loops
        let control_sink: Box<dyn ActuationSink> = match topology {
            Topology::Direct => Box::new(DirectActuation::new(
                outbox(names::CONTROL),
                ActuationTargets::actuators(),
            )),
            Topology::Hardened => Box::new(MediatedActuation::new(
                outbox(names::CONTROL),
                names::SECURITY,
                ActuationTargets::safety_gated(),
            )),
        };
        let mut control = ControlSystem::new(config.control.clone(), control_sink)
            .context("Invalid control configuration")?;
        if config.control.faults.enabled {
            control.enable_surprises();
        }
        let control = ControlSystemActor::new(names::CONTROL, control);
        let control_status = control.subscribe();
        wiring.add(control, ticks.control.tick)?;

        let safety_status = if topology.is_hardened() {
            let sink = MediatedActuation::new(
                outbox(names::SAFETY),
                names::SECURITY,
                ActuationTargets::actuators(),
            );
            let safety = SafetyBlockActor::new(
                names::SAFETY,
                SafetyBlock::new(config.safety.clone(), sink),
            );
            let status = safety.subscribe();
            wiring.add(safety, ticks.safety.tick)?;
            Some(status)
        } else {
            None
        };

        // Mission path
        let egress = config
            .mission
            .post_to_fleet
            .then(|| ActorId::from(names::PLANNER_EGRESS));
        let planner = MissionPlanner::new(
            outbox(names::PLANNER),
            PlannerConfig {
                egress: egress.clone(),
                ..PlannerConfig::default()
            },
        );
        let planner_client = planner.client();
        let planner_status = planner.subscribe();
        wiring.add(planner, ticks.planner.tick)?;

        wiring.add(
            CommunicationGateway::new(
                outbox(names::COMMUNICATION),
                GatewayConfig {
                    consumers: topology.mission_consumers(),
                    delivery: topology.fan_out(),
                },
            ),
            ticks.communication.tick,
        )?;

        // Drive side
        let navigation = NavigationSystem::new(
            outbox(names::NAVIGATION),
            NavigationConfig {
                consumers: topology.mission_consumers(),
                delivery: topology.fan_out(),
                ..NavigationConfig::default()
            },
        );
        let navigation_status = navigation.subscribe();
        wiring.add(navigation, ticks.navigation.tick)?;

        let servos = Servos::new(outbox(names::SERVOS));
        let servo_status = servos.subscribe();
        wiring.add(servos, ticks.servos.tick)?;

        let cargo = CargoBay::new(names::CARGO);
        let cargo_status = cargo.subscribe();
        wiring.add(cargo, ticks.cargo.tick)?;

        let telemetry = config
            .simulator
            .post_telemetry
            .then(|| ActorId::from(names::SITL_TELEMETRY));
        let sitl = Sitl::new(
            outbox(names::SITL),
            SitlConfig {
                home: mission.home,
                car_id: config.simulator.car_id.clone(),
                step: ticks.sitl.tick,
                telemetry: telemetry.clone(),
                ..SitlConfig::default()
            },
        );
        let vehicle_status = sitl.subscribe();
        wiring.add(sitl, ticks.sitl.tick)?;

        // Fleet egress
        if let Some(name) = egress {
            wiring.add(
                TelemetryEgress::new(name, config.simulator.car_id.clone()),
                ticks.egress.tick,
            )?;
        }
        let telemetry_status = match telemetry {
            Some(name) => {
                let egress = TelemetryEgress::new(name, config.simulator.car_id.clone());
                let status = egress.subscribe();
                wiring.add(egress, ticks.egress.tick)?;
                Some(status)
            }
            None => None,
        };

        // Every mailbox exists now; the mission waits at the planner.
        planner_client
            .set_new_mission(mission.clone())
            .context("Cannot queue the initial mission")?;

        info!(
            components = wiring.pending.len(),
            waypoints = mission.waypoints.len(),
            "Vehicle built"
        );

        Ok(Self {
            topology,
            registry,
            mission,
            pending: wiring.pending,
            handles: Vec::new(),
            planner: planner_client,
            policies,
            monitor_stats,
            status: StatusFeeds {
                planner: planner_status,
                control: control_status,
                safety: safety_status,
                navigation: navigation_status,
                servos: servo_status,
                cargo: cargo_status,
                vehicle: vehicle_status,
                telemetry: telemetry_status,
            },
        })
    }

    /// Spawns every built actor. Returns how many were started.
    pub fn start(&mut self) -> usize {
        let started = self.pending.len();
        for actor in self.pending.drain(..) {
            info!(actor = %actor.name, "Starting");
            self.handles.push((actor.launch)());
        }
        started
    }

    pub fn is_running(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Signals every actor, then waits for all of them.
    pub async fn stop(&mut self) -> BusResult<()> {
        for handle in &self.handles {
            info!(actor = %handle.name(), "Stopping");
            handle.stop();
        }

        let mut first_error = None;
        for handle in self.handles.drain(..) {
            if let Err(e) = handle.join().await {
                error!(error = %e, "Actor did not shut down cleanly");
                first_error.get_or_insert(e);
            }
        }
        info!("All components stopped");
        first_error.map_or(Ok(()), Err)
    }

    /// Latches the safety block's emergency stop.
    pub fn emergency_stop(&self) -> BusResult<()> {
        let safety = self
            .handles
            .iter()
            .find(|h| h.name() == names::SAFETY)
            .ok_or_else(|| BusError::NotFound {
                name: names::SAFETY.into(),
            })?;
        info!("Emergency stop requested");
        safety.send_control(ControlEvent::emergency_stop())
    }

    /// Replaces the monitor's policy table. No-op in the direct topology.
    pub fn set_security_policies(&self, policies: Vec<SecurityPolicy>) {
        match &self.policies {
            Some(store) => {
                let count = policies.len();
                let previous = store.replace(policies);
                info!(previous = previous.len(), current = count, "Security policies replaced");
            }
            None => error!("No security monitor in the direct topology"),
        }
    }

    pub fn policies(&self) -> Option<&PolicyStore> {
        self.policies.as_ref()
    }

    pub fn monitor_stats(&self) -> Option<Arc<MonitorStats>> {
        self.monitor_stats.clone()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn planner(&self) -> &PlannerClient {
        &self.planner
    }

    pub fn registry(&self) -> &Arc<MailboxRegistry> {
        &self.registry
    }

    pub fn status(&self) -> &StatusFeeds {
        &self.status
    }
}

struct Wiring {
    registry: Arc<MailboxRegistry>,
    pending: Vec<PendingActor>,
}

impl Wiring {
    /// Registers the actor's mailbox now; the actor runs on `start()`.
    fn add<A: Actor>(&mut self, actor: A, tick: Duration) -> Result<()> {
        let name = actor.name().clone();
        let mailbox = self
            .registry
            .open_mailbox(name.clone())
            .with_context(|| format!("Cannot register mailbox for '{name}'"))?;
        self.pending.push(PendingActor {
            name,
            launch: Box::new(move || spawn_actor(actor, mailbox, ActorConfig::with_tick(tick))),
        });
        Ok(())
    }
}

fn load_mission(config: &VehicleConfig) -> Result<Mission> {
    let MissionConfig {
        wpl_path,
        waypoints,
        speed_limits,
        armed,
        ..
    } = &config.mission;

    let mut importer = match wpl_path {
        Some(path) => MissionImporter::from_file(path)
            .with_context(|| format!("Cannot import mission from {}", path.display()))?,
        None => {
            let mut points = waypoints.clone();
            if points.first() != Some(&config.simulator.home) {
                points.insert(0, config.simulator.home);
            }
            MissionImporter::from_points(points).context("Configured mission is empty")?
        }
    };
    importer
        .set_speed_limits(speed_limits.clone())
        .set_armed(*armed);
    Ok(importer.into_mission())
}
