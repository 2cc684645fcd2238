//! # Direct vs Hardened
//!
//! The same tampered control system run in both topologies. In the direct
//! baseline the injected speed reaches the drive; in the hardened vehicle
//! the safety block caps it.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::e2e_mission::support::*;
    use ci_02_control_system::FaultInjection;
    use vehicle_runtime::{Topology, VehicleSystem};

    /// Highest speed the simulator was driven at before the route ended.
    async fn peak_drive_speed(topology: Topology) -> f64 {
        let mut config = short_run(topology);
        config.control.faults = FaultInjection {
            enabled: true,
            // Keep the vehicle on course so it reaches the boosted segment
            bearing_flip_index: usize::MAX,
            speed_boost_index: 1,
            speed_boost_kmh: 100.0,
            cargo_release_index: usize::MAX,
        };

        let mut system = VehicleSystem::build(config).unwrap();
        system.start();
        let status = system.status().clone();

        let mut peak: f64 = 0.0;
        let finished = wait_until(Duration::from_secs(30), || {
            peak = peak.max(status.vehicle.borrow().speed_kmh);
            status.control.borrow().route_finished
        })
        .await;
        assert!(finished, "{topology} run did not finish");

        system.stop().await.unwrap();
        peak
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_direct_baseline_passes_tampered_speed() {
        let peak = peak_drive_speed(Topology::Direct).await;
        assert!(peak > 100.0, "peak {peak}");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_hardened_vehicle_caps_tampered_speed() {
        let peak = peak_drive_speed(Topology::Hardened).await;
        assert!(peak > 0.0);
        assert!(peak <= 60.0, "peak {peak}");
    }
}
