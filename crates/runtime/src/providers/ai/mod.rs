//! Enemy decision making.
//!
//! - [`BehaviorEngine`]: per-actor state machine producing one [`Decision`]
//! - [`BossController`]: rage and summon ability clock for boss profiles
//! - [`PathFinder`]: bounded four-neighbour A*
//! - [`TacticalScorer`]: cover and distance-band scoring for flank cells
//! - [`AiContext`]: read-only snapshot a decision is computed against

pub mod boss;
pub mod context;
pub mod decision;
pub mod engine;
pub mod movement;
pub mod pathfinder;
pub mod sight;
pub mod tactics;

pub use boss::BossController;
pub use context::{AiContext, Reservations};
pub use decision::{Decision, SpawnRequest};
pub use engine::BehaviorEngine;
pub use pathfinder::PathFinder;
pub use sight::{field_of_view, has_line_of_sight};
pub use tactics::TacticalScorer;
