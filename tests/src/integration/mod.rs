//! # Integration Tests
//!
//! Live actors exchanging events through the mailbox registry. The servos
//! and cargo bay are replaced by bare mailboxes so every command that would
//! reach hardware can be inspected.

pub mod e2e_mission;
pub mod scenarios;
pub mod topology;

// =============================================================================
// TEST FIXTURES (only compiled during tests)
// =============================================================================

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;
    use std::time::Duration;

    use ci_01_security_monitor::{MonitorStats, PolicyStore, SecurityMonitor, SecurityMonitorActor};
    use ci_02_control_system::{ControlConfig, ControlStatus, ControlSystem, ControlSystemActor};
    use ci_03_safety_block::{SafetyBlock, SafetyBlockActor, SafetyConfig, SafetyStatus};
    use shared_bus::{
        spawn_actor, ActorConfig, ActorHandle, ActuationTargets, DirectActuation, Mailbox,
        MailboxRegistry, MediatedActuation, Outbox,
    };
    use shared_types::{geo, names, Event, GeoPoint, Mission, Operation, Payload, SpeedLimit};
    use tokio::sync::watch;
    use vehicle_runtime::hardened_policies;

    pub const TICK: Duration = Duration::from_millis(10);

    pub const HOME: GeoPoint = GeoPoint::new(63.197640, 75.453721);
    pub const P1: GeoPoint = GeoPoint::new(63.198640, 75.453721);
    pub const P2: GeoPoint = GeoPoint::new(63.198640, 75.456000);
    pub const P3: GeoPoint = GeoPoint::new(63.197640, 75.456000);

    /// Four-point reference route with limits (0,30) (1,60) (2,60) (3,45).
    pub fn reference_mission() -> Mission {
        Mission::new(
            HOME,
            vec![HOME, P1, P2, P3],
            vec![
                SpeedLimit::new(0, 30.0),
                SpeedLimit::new(1, 60.0),
                SpeedLimit::new(2, 60.0),
                SpeedLimit::new(3, 45.0),
            ],
        )
        .armed(true)
    }

    /// A point `metres` short of `target`, approaching from `from`.
    pub fn short_of(from: GeoPoint, target: GeoPoint, metres: f64) -> GeoPoint {
        geo::destination(target, geo::initial_bearing_deg(target, from), metres)
    }

    pub async fn settle() {
        tokio::time::sleep(Duration::from_millis(150)).await;
    }

    pub fn drain(mailbox: &mut Mailbox) -> Vec<Event> {
        std::iter::from_fn(|| mailbox.try_next()).collect()
    }

    pub fn speeds(events: &[Event]) -> Vec<f64> {
        events
            .iter()
            .filter(|e| e.operation == Operation::SetSpeed)
            .filter_map(|e| e.parameters.as_speed().ok())
            .collect()
    }

    /// Control, safety and monitor running; servos and cargo are bare mailboxes.
    pub struct HardenedRig {
        pub registry: Arc<MailboxRegistry>,
        pub servos: Mailbox,
        pub cargo: Mailbox,
        pub control: watch::Receiver<ControlStatus>,
        pub safety: watch::Receiver<SafetyStatus>,
        pub policies: PolicyStore,
        pub stats: Arc<MonitorStats>,
        pub handles: Vec<ActorHandle>,
    }

    impl HardenedRig {
        pub fn start(control_config: ControlConfig) -> Self {
            let registry = MailboxRegistry::shared();
            let servos = registry.open_mailbox(names::SERVOS).unwrap();
            let cargo = registry.open_mailbox(names::CARGO).unwrap();
            let monitor_box = registry.open_mailbox(names::SECURITY).unwrap();
            let control_box = registry.open_mailbox(names::CONTROL).unwrap();
            let safety_box = registry.open_mailbox(names::SAFETY).unwrap();

            let policies = PolicyStore::new(hardened_policies());
            let monitor = SecurityMonitor::new(names::SECURITY, policies.clone(), registry.clone());
            let stats = monitor.stats();

            let control = ControlSystemActor::new(
                names::CONTROL,
                ControlSystem::new(
                    control_config,
                    MediatedActuation::new(
                        Outbox::new(names::CONTROL, registry.clone()),
                        names::SECURITY,
                        ActuationTargets::safety_gated(),
                    ),
                )
                .unwrap(),
            );
            let safety = SafetyBlockActor::new(
                names::SAFETY,
                SafetyBlock::new(
                    SafetyConfig::default(),
                    MediatedActuation::new(
                        Outbox::new(names::SAFETY, registry.clone()),
                        names::SECURITY,
                        ActuationTargets::actuators(),
                    ),
                ),
            );
            let control_status = control.subscribe();
            let safety_status = safety.subscribe();

            let config = ActorConfig::with_tick(TICK);
            let handles = vec![
                spawn_actor(SecurityMonitorActor::new(monitor), monitor_box, config),
                spawn_actor(control, control_box, config),
                spawn_actor(safety, safety_box, config),
            ];

            Self {
                registry,
                servos,
                cargo,
                control: control_status,
                safety: safety_status,
                policies,
                stats,
                handles,
            }
        }

        /// Injects an event into the monitor as `source` addressed to `destination`.
        pub fn via_monitor(&self, source: &str, destination: &str, operation: Operation, payload: Payload) {
            let event = Event::new(source, destination, operation, payload);
            self.registry
                .deliver_to(&names::SECURITY.into(), event)
                .unwrap();
        }

        /// Mission from the gateway to both control loops.
        pub fn send_mission(&self, mission: Mission) {
            for consumer in [names::CONTROL, names::SAFETY] {
                self.via_monitor(
                    names::COMMUNICATION,
                    consumer,
                    Operation::SetMission,
                    Payload::Mission(mission.clone()),
                );
            }
        }

        /// Position from navigation to both control loops.
        pub fn send_position(&self, position: GeoPoint) {
            for consumer in [names::CONTROL, names::SAFETY] {
                self.via_monitor(
                    names::NAVIGATION,
                    consumer,
                    Operation::PositionUpdate,
                    Payload::Position(position),
                );
            }
        }

        pub async fn shutdown(self) {
            for handle in &self.handles {
                handle.stop();
            }
            for handle in self.handles {
                handle.join().await.unwrap();
            }
        }
    }

    /// Control alone, wired straight to bare servos and cargo mailboxes.
    pub struct DirectRig {
        pub registry: Arc<MailboxRegistry>,
        pub servos: Mailbox,
        pub cargo: Mailbox,
        pub control: watch::Receiver<ControlStatus>,
        pub handle: ActorHandle,
    }

    impl DirectRig {
        pub fn start(control_config: ControlConfig) -> Self {
            let registry = MailboxRegistry::shared();
            let servos = registry.open_mailbox(names::SERVOS).unwrap();
            let cargo = registry.open_mailbox(names::CARGO).unwrap();
            let control_box = registry.open_mailbox(names::CONTROL).unwrap();

            let control = ControlSystemActor::new(
                names::CONTROL,
                ControlSystem::new(
                    control_config,
                    DirectActuation::new(
                        Outbox::new(names::CONTROL, registry.clone()),
                        ActuationTargets::actuators(),
                    ),
                )
                .unwrap(),
            );
            let status = control.subscribe();
            let handle = spawn_actor(control, control_box, ActorConfig::with_tick(TICK));

            Self {
                registry,
                servos,
                cargo,
                control: status,
                handle,
            }
        }

        pub fn send(&self, source: &str, operation: Operation, payload: Payload) {
            self.registry
                .deliver(Event::new(source, names::CONTROL, operation, payload))
                .unwrap();
        }

        pub async fn shutdown(self) {
            self.handle.stop();
            self.handle.join().await.unwrap();
        }
    }
}
