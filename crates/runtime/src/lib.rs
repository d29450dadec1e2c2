//! Runtime orchestration for the real-time dungeon simulation.
//!
//! This crate hosts the enemy decision engine and the tick driver that
//! applies its decisions, and wraps both in an async worker. Consumers embed
//! [`Runtime`] to drive ticks, subscribe to events, and query occupancy
//! through [`RuntimeHandle`], or use [`Session`] directly for synchronous
//! stepping.
//!
//! Modules are organized by responsibility:
//! - [`providers`] holds the behavior engine, boss controller, pathfinder,
//!   tactical scorer and the combat resolver seam
//! - [`session`] owns the world and runs decide-then-apply ticks
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, SessionEvent, SimulationEvent, Topic};
pub use providers::{
    AttackOutcome, BehaviorEngine, BossController, CombatResolver, Decision, EffectiveStats,
    FlatResolver, PathFinder, SpawnRequest, TacticalScorer,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::{LevelSetup, ProcessedAction, Session, TickReport};
