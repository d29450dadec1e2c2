//! Errors raised while building static environment data.

use crate::env::EnemyTypeId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("map expects {expected} tiles, got {actual}")]
    MapSizeMismatch { expected: usize, actual: usize },

    #[error("map row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("position {0} is out of map bounds")]
    OutOfBounds(Position),

    #[error("enemy {0} is not in the catalog")]
    UnknownEnemyType(EnemyTypeId),

    #[error("enemy {0} is defined twice")]
    DuplicateEnemyType(EnemyTypeId),

    #[error("boss {boss} summons unknown enemy {minion}")]
    UnknownMinion {
        boss: EnemyTypeId,
        minion: EnemyTypeId,
    },
}

impl GameError for EnvError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapSizeMismatch { .. } => "ENV_MAP_SIZE_MISMATCH",
            Self::RaggedRow { .. } => "ENV_RAGGED_ROW",
            Self::OutOfBounds(_) => "ENV_OUT_OF_BOUNDS",
            Self::UnknownEnemyType(_) => "ENV_UNKNOWN_ENEMY_TYPE",
            Self::DuplicateEnemyType(_) => "ENV_DUPLICATE_ENEMY_TYPE",
            Self::UnknownMinion { .. } => "ENV_UNKNOWN_MINION",
        }
    }
}
