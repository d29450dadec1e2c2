//! Deterministic data model for the dungeon simulation core.
//!
//! `game-core` defines actors, the canonical actor arena, the spatial index,
//! readiness clocks, static terrain and the enemy catalog. It performs no I/O
//! and never logs; the runtime drives it and content loaders feed it.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{Action, DeathCause};
pub use config::SimConfig;
pub use engine::{ActionClock, ActionScheduler, SchedulerMode};
pub use env::{
    BehaviorProfile, BossSpec, DecisionRng, EnemyCatalog, EnemyEntry, EnemyTypeId, Env, EnvError,
    GridMap, MapDimensions, MapOracle, RangedProfile, TerrainKind, VisibilityGrid,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ActorKind, ActorState, BossState, BuffFlags, CombatStatus, EntitiesState, EntityId, GameState,
    Occupant, Position, ResourceMeter, SpatialIndex, StateError, Tick,
};
