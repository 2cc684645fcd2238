//! # End-to-End Mission Tests
//!
//! The complete vehicle from [`vehicle_runtime::VehicleSystem`] driving a
//! short mission in the simulator:
//!
//! ```text
//! planner → communication → [security] → control | safety
//! sitl ⇄ navigation → [security] → control | safety
//! control → [security] → safety → [security] → servos → sitl
//! ```
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: route completed and cargo released in both topologies
//! 2. **Emergency Stop**: the latch halts a moving vehicle
//! 3. **Egress**: mission and telemetry records leave the vehicle

#[cfg(test)]
pub(crate) mod support {
    use std::time::Duration;

    use shared_types::{geo, GeoPoint, SpeedLimit};
    use vehicle_runtime::container::config::{ComponentSettings, ComponentsConfig};
    use vehicle_runtime::{Topology, VehicleConfig};

    pub const START: GeoPoint = GeoPoint::new(63.197640, 75.453721);

    pub fn every_component(tick: Duration) -> ComponentsConfig {
        let settings = ComponentSettings::every(tick);
        ComponentsConfig {
            planner: settings.clone(),
            communication: settings.clone(),
            control: settings.clone(),
            navigation: settings.clone(),
            servos: settings.clone(),
            cargo: settings.clone(),
            safety: settings.clone(),
            security: settings.clone(),
            sitl: settings.clone(),
            egress: settings,
        }
    }

    /// `start` → 30 m north → 30 m east, fast ticks, no run limit.
    pub fn short_run(topology: Topology) -> VehicleConfig {
        let north = geo::destination(START, 0.0, 30.0);
        let east = geo::destination(north, 90.0, 30.0);
        let mut config = VehicleConfig {
            topology,
            components: every_component(Duration::from_millis(10)),
            ..VehicleConfig::default()
        };
        config.simulator.home = START;
        config.mission.waypoints = vec![START, north, east];
        config.mission.speed_limits = vec![SpeedLimit::new(0, 60.0)];
        config.run.duration = None;
        config
    }

    /// Polls `condition` until it holds or `limit` elapses.
    pub async fn wait_until(limit: Duration, mut condition: impl FnMut() -> bool) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while tokio::time::Instant::now() < deadline {
            if condition() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        condition()
    }
}

#[cfg(test)]
mod tests {
    use super::support::*;
    use std::time::Duration;

    use ci_06_cargo_bay::CargoState;
    use shared_types::geo;
    use vehicle_runtime::adapters::EgressRecord;
    use vehicle_runtime::{Topology, VehicleSystem};

    const MISSION_LIMIT: Duration = Duration::from_secs(30);

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    async fn drive_to_completion(topology: Topology) -> VehicleSystem {
        let mut system = VehicleSystem::build(short_run(topology)).unwrap();
        let finish = *system.mission().waypoints.last().unwrap();
        system.start();

        let status = system.status().clone();
        let done = wait_until(MISSION_LIMIT, || {
            status.control.borrow().route_finished && *status.cargo.borrow() == CargoState::Released
        })
        .await;
        assert!(done, "mission not completed: {:?}", *status.control.borrow());

        let parked = status.vehicle.borrow().position;
        assert!(geo::distance_m(parked, finish) < 10.0);
        system
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_hardened_vehicle_completes_mission() {
        let mut system = drive_to_completion(Topology::Hardened).await;
        let status = system.status().clone();

        let safety = status.safety.clone().expect("hardened has a safety block");
        assert!(
            wait_until(Duration::from_secs(2), || safety.borrow().route_finished).await,
            "safety route not finished"
        );
        // Final command is a stop, and it went through the safety block
        assert!(
            wait_until(Duration::from_secs(2), || status.servos.borrow().speed_kmh == 0.0).await
        );

        let stats = system.monitor_stats().unwrap();
        assert_eq!(stats.denied(), 0);
        assert!(stats.forwarded() > 0);

        system.stop().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_direct_vehicle_completes_mission() {
        let mut system = drive_to_completion(Topology::Direct).await;
        assert!(system.monitor_stats().is_none());
        system.stop().await.unwrap();
    }

    // =========================================================================
    // EMERGENCY STOP
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_emergency_stop_halts_vehicle() {
        let mut system = VehicleSystem::build(short_run(Topology::Hardened)).unwrap();
        system.start();
        let status = system.status().clone();

        assert!(wait_until(MISSION_LIMIT, || status.vehicle.borrow().speed_kmh > 0.0).await);
        system.emergency_stop().unwrap();

        assert!(wait_until(Duration::from_secs(2), || status.vehicle.borrow().speed_kmh == 0.0).await);
        let halted = status.vehicle.borrow().position;
        tokio::time::sleep(Duration::from_millis(300)).await;

        // Control keeps commanding; the latch keeps rejecting
        assert_eq!(status.vehicle.borrow().position, halted);
        assert_eq!(status.servos.borrow().speed_kmh, 0.0);
        assert!(!status.control.borrow().route_finished);
        assert!(status.safety.as_ref().unwrap().borrow().emergency_stop);

        system.stop().await.unwrap();
    }

    // =========================================================================
    // EGRESS
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_telemetry_leaves_the_vehicle() {
        let mut system = VehicleSystem::build(short_run(Topology::Hardened)).unwrap();
        system.start();
        let status = system.status().clone();
        let telemetry = status.telemetry.clone().expect("telemetry enabled by default");

        assert!(
            wait_until(Duration::from_secs(5), || matches!(
                &*telemetry.borrow(),
                Some(EgressRecord::Telemetry { id, .. }) if id == "m3"
            ))
            .await
        );
        assert_eq!(status.planner.borrow().as_ref(), Some(system.mission()));

        system.stop().await.unwrap();
    }
}
