//! # Actor Runtime
//!
//! Generic long-running unit: one mailbox, one control channel, a periodic
//! tick. The only suspension point of the loop is the tick sleep; mailbox and
//! control reads never wait.

use async_trait::async_trait;
use futures::FutureExt;
use shared_types::{ActorId, ControlEvent, Event};
use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, Instrument};

use crate::error::{BusError, BusResult};
use crate::registry::Mailbox;
use autonomy_telemetry::metrics::{ACTOR_EVENTS_PROCESSED, ACTOR_HANDLER_FAILURES};

/// Tick period used when a component does not configure its own.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Behaviour plugged into the tick loop.
///
/// Every hook returns a `Result`; an `Err` (or a panic) is logged against the
/// actor and the loop carries on with the next event.
#[async_trait]
pub trait Actor: Send + 'static {
    type Error: Display + Send;

    /// Identity the actor's mailbox is registered under.
    fn name(&self) -> &ActorId;

    /// Runs once before the first tick.
    async fn on_start(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Periodic work, run at the start of every tick before the mailbox drain.
    async fn on_tick(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), Self::Error>;

    /// Control events other than `stop`.
    async fn handle_control(&mut self, control: ControlEvent) -> Result<(), Self::Error> {
        debug!(actor = %self.name(), operation = ?control.operation, "Control event ignored");
        Ok(())
    }

    /// Runs once after the loop has exited.
    async fn on_stop(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorConfig {
    pub tick: Duration,
}

impl ActorConfig {
    pub const fn with_tick(tick: Duration) -> Self {
        Self { tick }
    }
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self { tick: DEFAULT_TICK }
    }
}

/// Owner-side handle of a spawned actor.
#[derive(Debug)]
pub struct ActorHandle {
    name: ActorId,
    control: mpsc::UnboundedSender<ControlEvent>,
    task: JoinHandle<()>,
}

impl ActorHandle {
    pub fn name(&self) -> &ActorId {
        &self.name
    }

    /// Requests termination and returns immediately.
    ///
    /// The actor exits after its current mailbox drain; use [`ActorHandle::join`]
    /// to wait for it.
    pub fn stop(&self) {
        if self.send_control(ControlEvent::stop()).is_err() {
            debug!(actor = %self.name, "Stop requested for an actor that already exited");
        }
    }

    pub fn send_control(&self, control: ControlEvent) -> BusResult<()> {
        self.control
            .send(control)
            .map_err(|_| BusError::ActorStopped {
                name: self.name.clone(),
            })
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the loop to exit.
    pub async fn join(self) -> BusResult<()> {
        self.task.await.map_err(|e| BusError::JoinFailed {
            name: self.name,
            reason: e.to_string(),
        })
    }
}

/// Spawns `actor` onto the current tokio runtime.
pub fn spawn_actor<A: Actor>(actor: A, mailbox: Mailbox, config: ActorConfig) -> ActorHandle {
    let name = actor.name().clone();
    let (control, control_rx) = mpsc::unbounded_channel();
    let span = tracing::info_span!("actor", name = %name);
    let task = tokio::spawn(run_loop(actor, mailbox, control_rx, config).instrument(span));
    ActorHandle {
        name,
        control,
        task,
    }
}

async fn run_loop<A: Actor>(
    mut actor: A,
    mut mailbox: Mailbox,
    mut control: mpsc::UnboundedReceiver<ControlEvent>,
    config: ActorConfig,
) {
    let name = actor.name().clone();
    info!(
        actor = %name,
        tick_ms = config.tick.as_millis() as u64,
        "Actor started"
    );
    isolate(&name, "start", actor.on_start()).await;

    let mut quit = false;
    while !quit {
        isolate(&name, "tick", actor.on_tick()).await;

        while let Some(event) = mailbox.try_next() {
            ACTOR_EVENTS_PROCESSED
                .with_label_values(&[name.as_str()])
                .inc();
            let operation = event.operation.clone();
            isolate(&name, operation.as_str(), actor.handle_event(event)).await;
        }

        match control.try_recv() {
            Ok(request) if request.is_stop() => quit = true,
            Ok(request) => isolate(&name, "control", actor.handle_control(request)).await,
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                debug!(actor = %name, "Control channel closed, stopping");
                quit = true;
            }
        }

        if !quit {
            tokio::time::sleep(config.tick).await;
        }
    }

    actor.on_stop().await;
    info!(actor = %name, "Actor stopped");
}

/// Runs one hook, containing both errors and panics.
async fn isolate<F, E>(actor: &ActorId, stage: &str, hook: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match AssertUnwindSafe(hook).catch_unwind().await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            ACTOR_HANDLER_FAILURES
                .with_label_values(&[actor.as_str()])
                .inc();
            error!(actor = %actor, stage, error = %e, "Event handling failed");
        }
        Err(payload) => {
            ACTOR_HANDLER_FAILURES
                .with_label_values(&[actor.as_str()])
                .inc();
            error!(
                actor = %actor,
                stage,
                panic = %panic_message(payload.as_ref()),
                "Handler panicked"
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
