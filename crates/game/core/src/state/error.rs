//! Errors raised by the actor arena and the spatial index.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("player singleton is missing")]
    PlayerMissing,

    #[error("actor {id} is at {canonical} but indexed at {indexed:?}")]
    IndexDesync {
        id: EntityId,
        canonical: Position,
        indexed: Option<Position>,
    },

    #[error("spatial index still references removed actor {id}")]
    StaleIndexEntry { id: EntityId },

    #[error("cell {position} is not enterable")]
    CellBlocked { position: Position },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) => ErrorSeverity::Validation,
            Self::CellBlocked { .. } => ErrorSeverity::Recoverable,
            Self::IndexDesync { .. } | Self::StaleIndexEntry { .. } => ErrorSeverity::Internal,
            Self::PlayerMissing => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "STATE_ACTOR_NOT_FOUND",
            Self::PlayerMissing => "STATE_PLAYER_MISSING",
            Self::IndexDesync { .. } => "STATE_INDEX_DESYNC",
            Self::StaleIndexEntry { .. } => "STATE_STALE_INDEX_ENTRY",
            Self::CellBlocked { .. } => "STATE_CELL_BLOCKED",
        }
    }
}
