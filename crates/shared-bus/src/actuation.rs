//! # Actuation Sink
//!
//! Capability used by the control loops to emit speed, direction and cargo
//! commands. The topology decides at composition time whether commands go
//! straight to their targets or through the security monitor.

use shared_types::{names, ActorId, Operation, Payload};
use std::sync::Arc;

use crate::error::BusResult;
use crate::outbox::Outbox;

pub trait ActuationSink: Send + Sync {
    /// Speed in km/h.
    fn send_speed(&self, speed_kmh: f64) -> BusResult<()>;

    /// Bearing in degrees.
    fn send_direction(&self, bearing_deg: f64) -> BusResult<()>;

    fn send_cargo_lock(&self) -> BusResult<()>;

    fn send_cargo_release(&self) -> BusResult<()>;
}

impl<T: ActuationSink + ?Sized> ActuationSink for Box<T> {
    fn send_speed(&self, speed_kmh: f64) -> BusResult<()> {
        (**self).send_speed(speed_kmh)
    }
    fn send_direction(&self, bearing_deg: f64) -> BusResult<()> {
        (**self).send_direction(bearing_deg)
    }
    fn send_cargo_lock(&self) -> BusResult<()> {
        (**self).send_cargo_lock()
    }
    fn send_cargo_release(&self) -> BusResult<()> {
        (**self).send_cargo_release()
    }
}

impl<T: ActuationSink + ?Sized> ActuationSink for Arc<T> {
    fn send_speed(&self, speed_kmh: f64) -> BusResult<()> {
        (**self).send_speed(speed_kmh)
    }
    fn send_direction(&self, bearing_deg: f64) -> BusResult<()> {
        (**self).send_direction(bearing_deg)
    }
    fn send_cargo_lock(&self) -> BusResult<()> {
        (**self).send_cargo_lock()
    }
    fn send_cargo_release(&self) -> BusResult<()> {
        (**self).send_cargo_release()
    }
}

/// Logical recipients of motion and cargo commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuationTargets {
    pub motion: ActorId,
    pub cargo: ActorId,
}

impl ActuationTargets {
    pub fn new(motion: impl Into<ActorId>, cargo: impl Into<ActorId>) -> Self {
        Self {
            motion: motion.into(),
            cargo: cargo.into(),
        }
    }

    /// Servos and cargo bay, the last hop before hardware.
    pub fn actuators() -> Self {
        Self::new(names::SERVOS, names::CARGO)
    }

    /// Safety block for motion, cargo bay for cargo.
    pub fn safety_gated() -> Self {
        Self::new(names::SAFETY, names::CARGO)
    }
}

/// Writes straight into the target mailboxes. The insecure baseline.
#[derive(Debug, Clone)]
pub struct DirectActuation {
    outbox: Outbox,
    targets: ActuationTargets,
}

impl DirectActuation {
    pub fn new(outbox: Outbox, targets: ActuationTargets) -> Self {
        Self { outbox, targets }
    }

    fn emit(&self, target: &ActorId, operation: Operation, payload: Payload) -> BusResult<()> {
        self.outbox
            .registry()
            .deliver(self.outbox.event(target, operation, payload))
    }
}

impl ActuationSink for DirectActuation {
    fn send_speed(&self, speed_kmh: f64) -> BusResult<()> {
        self.emit(&self.targets.motion, Operation::SetSpeed, Payload::Speed(speed_kmh))
    }

    fn send_direction(&self, bearing_deg: f64) -> BusResult<()> {
        self.emit(
            &self.targets.motion,
            Operation::SetDirection,
            Payload::Direction(bearing_deg),
        )
    }

    fn send_cargo_lock(&self) -> BusResult<()> {
        self.emit(&self.targets.cargo, Operation::LockCargo, Payload::Empty)
    }

    fn send_cargo_release(&self) -> BusResult<()> {
        self.emit(&self.targets.cargo, Operation::ReleaseCargo, Payload::Empty)
    }
}

/// Hands every command to the security monitor, addressed to its real target.
#[derive(Debug, Clone)]
pub struct MediatedActuation {
    outbox: Outbox,
    monitor: ActorId,
    targets: ActuationTargets,
}

impl MediatedActuation {
    pub fn new(outbox: Outbox, monitor: impl Into<ActorId>, targets: ActuationTargets) -> Self {
        Self {
            outbox,
            monitor: monitor.into(),
            targets,
        }
    }

    fn emit(&self, target: &ActorId, operation: Operation, payload: Payload) -> BusResult<()> {
        self.outbox
            .registry()
            .deliver_to(&self.monitor, self.outbox.event(target, operation, payload))
    }
}

impl ActuationSink for MediatedActuation {
    fn send_speed(&self, speed_kmh: f64) -> BusResult<()> {
        self.emit(&self.targets.motion, Operation::SetSpeed, Payload::Speed(speed_kmh))
    }

    fn send_direction(&self, bearing_deg: f64) -> BusResult<()> {
        self.emit(
            &self.targets.motion,
            Operation::SetDirection,
            Payload::Direction(bearing_deg),
        )
    }

    fn send_cargo_lock(&self) -> BusResult<()> {
        self.emit(&self.targets.cargo, Operation::LockCargo, Payload::Empty)
    }

    fn send_cargo_release(&self) -> BusResult<()> {
        self.emit(&self.targets.cargo, Operation::ReleaseCargo, Payload::Empty)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    //! In-memory sink that records commands instead of sending them.

    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum ActuationCommand {
        Speed(f64),
        Direction(f64),
        CargoLock,
        CargoRelease,
    }

    #[derive(Debug, Default)]
    pub struct RecordingActuation {
        commands: Mutex<Vec<ActuationCommand>>,
    }

    impl RecordingActuation {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn commands(&self) -> Vec<ActuationCommand> {
            self.commands.lock().clone()
        }

        pub fn speeds(&self) -> Vec<f64> {
            self.commands()
                .into_iter()
                .filter_map(|c| match c {
                    ActuationCommand::Speed(v) => Some(v),
                    _ => None,
                })
                .collect()
        }

        pub fn directions(&self) -> Vec<f64> {
            self.commands()
                .into_iter()
                .filter_map(|c| match c {
                    ActuationCommand::Direction(v) => Some(v),
                    _ => None,
                })
                .collect()
        }

        pub fn count(&self, wanted: ActuationCommand) -> usize {
            self.commands().iter().filter(|c| **c == wanted).count()
        }

        pub fn clear(&self) {
            self.commands.lock().clear();
        }

        fn record(&self, command: ActuationCommand) -> BusResult<()> {
            self.commands.lock().push(command);
            Ok(())
        }
    }

    impl ActuationSink for RecordingActuation {
        fn send_speed(&self, speed_kmh: f64) -> BusResult<()> {
            self.record(ActuationCommand::Speed(speed_kmh))
        }
        fn send_direction(&self, bearing_deg: f64) -> BusResult<()> {
            self.record(ActuationCommand::Direction(bearing_deg))
        }
        fn send_cargo_lock(&self) -> BusResult<()> {
            self.record(ActuationCommand::CargoLock)
        }
        fn send_cargo_release(&self) -> BusResult<()> {
            self.record(ActuationCommand::CargoRelease)
        }
    }
}
