//! Deployment policy table of the hardened topology.

use shared_types::{names, Operation, SecurityPolicy};

/// Every flow the hardened vehicle needs, and nothing else.
pub fn hardened_policies() -> Vec<SecurityPolicy> {
    vec![
        // Mission intake
        SecurityPolicy::new(names::COMMUNICATION, names::CONTROL, Operation::SetMission),
        SecurityPolicy::new(names::COMMUNICATION, names::SAFETY, Operation::SetMission),
        // Positioning
        SecurityPolicy::new(names::NAVIGATION, names::CONTROL, Operation::PositionUpdate),
        SecurityPolicy::new(names::NAVIGATION, names::SAFETY, Operation::PositionUpdate),
        // Control
        SecurityPolicy::new(names::CONTROL, names::SAFETY, Operation::SetSpeed),
        SecurityPolicy::new(names::CONTROL, names::SAFETY, Operation::SetDirection),
        SecurityPolicy::new(names::CONTROL, names::CARGO, Operation::LockCargo),
        SecurityPolicy::new(names::CONTROL, names::CARGO, Operation::ReleaseCargo),
        // Safety
        SecurityPolicy::new(names::SAFETY, names::SERVOS, Operation::SetSpeed),
        SecurityPolicy::new(names::SAFETY, names::SERVOS, Operation::SetDirection),
        SecurityPolicy::new(names::SAFETY, names::CARGO, Operation::LockCargo),
        SecurityPolicy::new(names::SAFETY, names::CARGO, Operation::ReleaseCargo),
    ]
}
