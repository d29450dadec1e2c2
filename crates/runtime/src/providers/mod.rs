//! Decision and combat providers consumed by the tick driver.

pub mod ai;
pub mod combat;

pub use ai::{BehaviorEngine, BossController, Decision, PathFinder, SpawnRequest, TacticalScorer};
pub use combat::{AttackOutcome, CombatResolver, EffectiveStats, FlatResolver};
