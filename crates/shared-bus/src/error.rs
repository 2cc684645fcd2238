//! Error types for mailbox delivery and actor lifecycle.

use shared_types::ActorId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// A second mailbox was offered under a name that is already taken.
    #[error("Mailbox '{name}' is already registered")]
    AlreadyRegistered { name: ActorId },

    /// No mailbox is registered under the name.
    #[error("No mailbox registered under '{name}'")]
    NotFound { name: ActorId },

    /// The owning actor has exited and dropped its receiver.
    #[error("Mailbox '{name}' is closed")]
    MailboxClosed { name: ActorId },

    /// The actor's loop has exited; control events can no longer be delivered.
    #[error("Actor '{name}' is no longer running")]
    ActorStopped { name: ActorId },

    /// The actor task panicked outside of event handling or was aborted.
    #[error("Actor '{name}' task failed: {reason}")]
    JoinFailed { name: ActorId, reason: String },
}

/// Result type for bus operations
pub type BusResult<T> = Result<T, BusError>;
