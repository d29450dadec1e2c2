//! Unified error types surfaced by the runtime API.
//!
//! Per-actor decision failures never reach this layer; they degrade to a
//! weaker action inside the engine. What remains is worker coordination and
//! host requests the world cannot honour.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{GameError, Position, StateError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a session before building")]
    MissingSession,

    #[error("cannot move the player onto impassable terrain at {position}")]
    ImpassableTerrain { position: Position },

    #[error(transparent)]
    State(#[from] StateError),
}

impl RuntimeError {
    /// True when the simulation can keep running after the error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RuntimeError::ImpassableTerrain { .. } => true,
            RuntimeError::State(err) => err.severity().is_recoverable(),
            _ => false,
        }
    }
}
