//! # Safety Bypass Attempts
//!
//! ## Threat Model
//!
//! A component that can write into the monitor's mailbox is compromised and
//! tries to command the drive or the cargo bay:
//!
//! | Attacker      | Target  | Attempt                        | Expected   |
//! |---------------|---------|--------------------------------|------------|
//! | control       | servos  | `set_speed` around safety      | denied     |
//! | control       | safety  | `set_speed` 250 km/h           | clamped 60 |
//! | control       | safety  | NaN / infinite speed or bearing| rejected   |
//! | navigation    | control | `set_mission` (wrong op)       | denied     |
//! | communication | cargo   | `release_cargo`                | denied     |
//! | unknown actor | control | any                            | denied     |
//! | control       | safety  | `set_speed` after e-stop       | rejected   |

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use ci_02_control_system::ControlConfig;
    use shared_types::{names, Mission, Operation, Payload};

    #[tokio::test]
    async fn test_control_cannot_drive_servos_directly() {
        let mut rig = HardenedRig::start(ControlConfig::default());
        for speed in [10.0, 90.0, 250.0] {
            rig.via_monitor(names::CONTROL, names::SERVOS, Operation::SetSpeed, Payload::Speed(speed));
        }
        rig.via_monitor(names::CONTROL, names::SERVOS, Operation::SetDirection, Payload::Direction(180.0));
        settle().await;

        assert!(drain(&mut rig.servos).is_empty());
        assert_eq!(rig.stats.denied(), 4);
        rig.shutdown().await;
    }

    #[tokio::test]
    async fn test_excessive_speed_through_safety_is_clamped() {
        let mut rig = HardenedRig::start(ControlConfig::default());
        rig.via_monitor(names::CONTROL, names::SAFETY, Operation::SetSpeed, Payload::Speed(250.0));
        rig.via_monitor(names::CONTROL, names::SAFETY, Operation::SetSpeed, Payload::Speed(-5.0));
        settle().await;

        assert_eq!(speeds(&drain(&mut rig.servos)), vec![60.0]);
        assert_eq!(rig.stats.denied(), 0);
        rig.shutdown().await;
    }

    #[tokio::test]
    async fn test_non_finite_commands_never_reach_servos() {
        let mut rig = HardenedRig::start(ControlConfig::default());
        rig.via_monitor(names::CONTROL, names::SAFETY, Operation::SetSpeed, Payload::Speed(40.0));
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            rig.via_monitor(names::CONTROL, names::SAFETY, Operation::SetSpeed, Payload::Speed(value));
            rig.via_monitor(
                names::CONTROL,
                names::SAFETY,
                Operation::SetDirection,
                Payload::Direction(value),
            );
        }
        settle().await;

        let forwarded = drain(&mut rig.servos);
        assert!(forwarded.iter().all(|e| match e.parameters {
            Payload::Speed(v) => v.is_finite() && (0.0..=60.0).contains(&v),
            Payload::Direction(v) => v.is_finite(),
            _ => false,
        }));
        assert_eq!(speeds(&forwarded), vec![40.0]);
        assert!(forwarded.iter().all(|e| e.operation != Operation::SetDirection));
        assert_eq!(rig.safety.borrow().speed_kmh, 40.0);
        assert_eq!(rig.stats.denied(), 0);
        rig.shutdown().await;
    }

    #[tokio::test]
    async fn test_wrong_operation_and_unknown_sender_are_denied() {
        let mut rig = HardenedRig::start(ControlConfig::default());
        let rogue = Mission::new(P3, vec![P3, HOME], vec![]).armed(true);

        rig.via_monitor(
            names::NAVIGATION,
            names::CONTROL,
            Operation::SetMission,
            Payload::Mission(rogue.clone()),
        );
        rig.via_monitor(
            "intruder",
            names::CONTROL,
            Operation::SetMission,
            Payload::Mission(rogue),
        );
        rig.via_monitor(names::COMMUNICATION, names::CARGO, Operation::ReleaseCargo, Payload::Empty);
        rig.via_monitor(
            names::CONTROL,
            names::CARGO,
            Operation::Other("open_hatch".into()),
            Payload::Empty,
        );
        settle().await;

        assert!(!rig.control.borrow().mission_loaded);
        assert!(drain(&mut rig.cargo).is_empty());
        assert_eq!(rig.stats.denied(), 4);
        rig.shutdown().await;
    }

    #[tokio::test]
    async fn test_emergency_stop_survives_later_commands() {
        let mut rig = HardenedRig::start(ControlConfig::default());
        rig.send_mission(reference_mission());
        rig.send_position(HOME);
        settle().await;
        assert_eq!(speeds(&drain(&mut rig.servos)), vec![30.0]);

        let safety = rig
            .handles
            .iter()
            .find(|h| h.name() == names::SAFETY)
            .unwrap();
        safety
            .send_control(shared_types::ControlEvent::emergency_stop())
            .unwrap();
        settle().await;
        assert_eq!(speeds(&drain(&mut rig.servos)), vec![0.0]);

        // Control keeps producing commands from new positions
        rig.send_position(short_of(HOME, P1, 50.0));
        rig.via_monitor(names::CONTROL, names::SAFETY, Operation::SetSpeed, Payload::Speed(20.0));
        settle().await;

        assert!(drain(&mut rig.servos).is_empty());
        assert!(rig.safety.borrow().emergency_stop);
        assert_eq!(rig.safety.borrow().speed_kmh, 0.0);
        rig.shutdown().await;
    }

    #[tokio::test]
    async fn test_revoked_policy_takes_effect_immediately() {
        let mut rig = HardenedRig::start(ControlConfig::default());
        let mut table = rig.policies.snapshot();
        table.retain(|p| !(p.source == names::SAFETY && p.operation == Operation::SetSpeed));
        rig.policies.replace(table);

        rig.via_monitor(names::CONTROL, names::SAFETY, Operation::SetSpeed, Payload::Speed(20.0));
        settle().await;

        // Safety accepted it, but its forward to the servos is no longer allowed
        assert!(drain(&mut rig.servos).is_empty());
        assert_eq!(rig.safety.borrow().speed_kmh, 20.0);
        assert_eq!(rig.stats.denied(), 1);
        rig.shutdown().await;
    }
}
