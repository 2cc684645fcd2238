use async_trait::async_trait;
use serde::Serialize;
use shared_bus::Actor;
use shared_types::{ActorId, Event, Operation};
use std::convert::Infallible;
use std::fmt;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoState {
    #[default]
    Locked,
    Released,
}

impl fmt::Display for CargoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locked => f.write_str("locked"),
            Self::Released => f.write_str("released"),
        }
    }
}

pub struct CargoBay {
    name: ActorId,
    state: watch::Sender<CargoState>,
}

impl CargoBay {
    pub fn new(name: impl Into<ActorId>) -> Self {
        let (state, _) = watch::channel(CargoState::Locked);
        Self {
            name: name.into(),
            state,
        }
    }

    pub fn state(&self) -> CargoState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CargoState> {
        self.state.subscribe()
    }

    fn set(&self, next: CargoState) {
        info!(from = %self.state(), to = %next, "Cargo bay");
        self.state.send_replace(next);
    }
}

#[async_trait]
impl Actor for CargoBay {
    type Error = Infallible;

    fn name(&self) -> &ActorId {
        &self.name
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), Infallible> {
        match event.operation {
            Operation::LockCargo => self.set(CargoState::Locked),
            Operation::ReleaseCargo => self.set(CargoState::Released),
            other => warn!(operation = %other, source = %event.source, "Unhandled operation"),
        }
        Ok(())
    }
}
