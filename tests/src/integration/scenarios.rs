//! # Reference Scenarios
//!
//! The four acceptance scenarios, run on live actors instead of bare state
//! machines:
//!
//! - **A**: reaching point 1 advances the route and commands 60 km/h.
//! - **B**: the default policy table forwards the gateway's mission and
//!   drops control's attempt to drive the servos directly.
//! - **C**: an injected +100 km/h at index 2 reaches the safety block and
//!   leaves it clamped to 60.
//! - **D**: an overloaded vehicle tracks its route but commands nothing.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use ci_02_control_system::{ControlConfig, FaultInjection};
    use shared_types::{names, Operation, Payload};

    // =========================================================================
    // SCENARIO A: WAYPOINT ADVANCE
    // =========================================================================

    #[tokio::test]
    async fn test_scenario_a_advance_commands_next_limit() {
        let mut rig = HardenedRig::start(ControlConfig::default());
        rig.send_mission(reference_mission());
        rig.send_position(short_of(HOME, P1, 3.0));
        settle().await;

        assert_eq!(rig.control.borrow().current_index, Some(1));
        assert_eq!(rig.safety.borrow().current_index, Some(1));

        let to_servos = drain(&mut rig.servos);
        assert_eq!(speeds(&to_servos), vec![60.0]);
        assert!(to_servos.iter().all(|e| e.source == names::SAFETY));

        // Mission intake locked the cargo through the monitor
        let to_cargo = drain(&mut rig.cargo);
        assert_eq!(to_cargo.len(), 1);
        assert_eq!(to_cargo[0].operation, Operation::LockCargo);
        assert_eq!(to_cargo[0].source, names::CONTROL);

        assert_eq!(rig.stats.denied(), 0);
        rig.shutdown().await;
    }

    // =========================================================================
    // SCENARIO B: POLICY ENFORCEMENT
    // =========================================================================

    #[tokio::test]
    async fn test_scenario_b_bypass_of_safety_is_denied() {
        let mut rig = HardenedRig::start(ControlConfig::default());

        rig.send_mission(reference_mission());
        rig.via_monitor(
            names::CONTROL,
            names::SERVOS,
            Operation::SetSpeed,
            Payload::Speed(40.0),
        );
        settle().await;

        assert!(rig.control.borrow().mission_loaded);
        assert!(drain(&mut rig.servos).is_empty());
        assert_eq!(rig.stats.denied(), 1);
        // Two missions plus the cargo lock
        assert_eq!(rig.stats.forwarded(), 3);

        rig.shutdown().await;
    }

    // =========================================================================
    // SCENARIO C: FAULT INJECTION CAUGHT BY SAFETY
    // =========================================================================

    #[tokio::test]
    async fn test_scenario_c_speed_fault_is_clamped() {
        let config = ControlConfig {
            faults: FaultInjection {
                enabled: true,
                ..FaultInjection::default()
            },
            ..ControlConfig::default()
        };
        let mut rig = HardenedRig::start(config);
        rig.send_mission(reference_mission());
        rig.send_position(short_of(HOME, P1, 2.0));
        settle().await;
        rig.send_position(short_of(P1, P2, 2.0));
        settle().await;

        let control = rig.control.borrow().clone();
        assert_eq!(control.current_index, Some(2));
        assert!((control.speed_kmh - 160.0).abs() < 1e-9);

        let safety = rig.safety.borrow().clone();
        assert_eq!(safety.speed_kmh, 60.0);

        let commanded = speeds(&drain(&mut rig.servos));
        assert_eq!(commanded.last(), Some(&60.0));
        assert!(commanded.iter().all(|s| *s <= 60.0), "{commanded:?}");

        rig.shutdown().await;
    }

    // =========================================================================
    // SCENARIO D: CARGO INTERLOCK
    // =========================================================================

    #[tokio::test]
    async fn test_scenario_d_overload_suppresses_motion() {
        let mut rig = DirectRig::start(ControlConfig {
            cargo_weight: 7.0,
            ..ControlConfig::default()
        });
        rig.send(
            names::COMMUNICATION,
            Operation::SetMission,
            Payload::Mission(reference_mission()),
        );
        rig.send(
            names::NAVIGATION,
            Operation::PositionUpdate,
            Payload::Position(short_of(HOME, P1, 3.0)),
        );
        settle().await;

        let status = rig.control.borrow().clone();
        assert_eq!(status.current_index, Some(1));
        assert!((status.speed_kmh - 60.0).abs() < 1e-9);
        assert!(status.direction_deg > 0.0);

        assert!(drain(&mut rig.servos).is_empty());
        let cargo: Vec<_> = drain(&mut rig.cargo)
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(cargo, vec![Operation::LockCargo]);

        rig.shutdown().await;
    }

    #[tokio::test]
    async fn test_direct_wiring_reaches_servos_unchecked() {
        let mut rig = DirectRig::start(ControlConfig::default());
        rig.send(
            names::COMMUNICATION,
            Operation::SetMission,
            Payload::Mission(reference_mission()),
        );
        rig.send(
            names::NAVIGATION,
            Operation::PositionUpdate,
            Payload::Position(HOME),
        );
        settle().await;

        let to_servos = drain(&mut rig.servos);
        assert_eq!(speeds(&to_servos), vec![30.0]);
        assert!(to_servos.iter().all(|e| e.source == names::CONTROL));
        rig.shutdown().await;
    }
}
