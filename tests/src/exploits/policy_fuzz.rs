//! # Policy Table Fuzzing
//!
//! Random `(source, destination, operation)` traffic against the deployment
//! table. Exactly the listed triples may pass; everything else is dropped
//! and nothing is delivered anywhere it was not addressed.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ci_01_security_monitor::{MonitorError, PolicyStore, SecurityMonitor};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use shared_bus::{Mailbox, MailboxRegistry};
    use shared_types::{names, ActorId, Event, Operation, Payload};
    use vehicle_runtime::hardened_policies;

    const ACTORS: &[&str] = &[
        names::PLANNER,
        names::COMMUNICATION,
        names::CONTROL,
        names::NAVIGATION,
        names::SERVOS,
        names::CARGO,
        names::SAFETY,
        names::SITL,
        "intruder",
    ];

    fn operations() -> Vec<Operation> {
        vec![
            Operation::SetMission,
            Operation::PositionUpdate,
            Operation::SetSpeed,
            Operation::SetDirection,
            Operation::LockCargo,
            Operation::ReleaseCargo,
            Operation::PostPosition,
            Operation::Other("self_destruct".into()),
        ]
    }

    #[test]
    fn test_random_traffic_only_passes_listed_triples() {
        let registry = MailboxRegistry::shared();
        let mut inboxes: HashMap<ActorId, Mailbox> = ACTORS
            .iter()
            .map(|name| (ActorId::from(*name), registry.open_mailbox(*name).unwrap()))
            .collect();
        let table = hardened_policies();
        let monitor = SecurityMonitor::new(names::SECURITY, PolicyStore::new(table.clone()), registry);

        let mut rng = StdRng::seed_from_u64(0x5AFE);
        let operations = operations();
        let mut expected: HashMap<ActorId, usize> = HashMap::new();
        let mut allowed = 0;

        for _ in 0..2_000 {
            let source = *ACTORS.choose(&mut rng).unwrap();
            let destination = *ACTORS.choose(&mut rng).unwrap();
            let operation = operations.choose(&mut rng).unwrap().clone();
            let event = Event::new(source, destination, operation, Payload::Empty);

            let listed = table.iter().any(|p| p.permits(&event));
            match monitor.mediate(event) {
                Ok(()) => {
                    assert!(listed);
                    allowed += 1;
                    *expected.entry(destination.into()).or_default() += 1;
                }
                Err(MonitorError::Unauthorized { .. }) => assert!(!listed),
                Err(other) => panic!("unexpected {other}"),
            }
        }

        assert!(allowed > 0, "seed produced no permitted traffic");
        assert_eq!(monitor.stats().forwarded(), allowed as u64);
        for (name, inbox) in inboxes.iter_mut() {
            let delivered: Vec<Event> = std::iter::from_fn(|| inbox.try_next()).collect();
            assert!(delivered.iter().all(|e| &e.destination == name));
            assert_eq!(delivered.len(), expected.get(name).copied().unwrap_or(0), "{name}");
        }
    }

    #[test]
    fn test_empty_table_denies_every_listed_flow() {
        let registry = MailboxRegistry::shared();
        let monitor = SecurityMonitor::new(names::SECURITY, PolicyStore::new(Vec::new()), registry);
        for policy in hardened_policies() {
            let event = Event::new(
                policy.source.clone(),
                policy.destination.clone(),
                policy.operation.clone(),
                Payload::Empty,
            );
            assert!(!monitor.check_event(&event), "{policy}");
        }
    }
}
