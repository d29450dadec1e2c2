use serde::{Deserialize, Serialize};

use game_core::{Action, EntityId, Tick};

use crate::providers::AttackOutcome;

/// One actor's applied decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessedAction {
    pub actor: EntityId,
    pub action: Action,
    /// Resolver result for attacks on the player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<AttackOutcome>,
}

/// Everything that happened during one tick, in processing order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub now: Tick,
    pub actions: Vec<ProcessedAction>,
    /// Sub-actors appended after the loop.
    pub spawned: Vec<EntityId>,
    /// Actors that died during their own decision.
    pub removed: Vec<EntityId>,
    /// Total damage dealt to the player this tick.
    pub player_damage: i32,
    pub player_died: bool,
}

impl TickReport {
    pub fn new(now: Tick) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Action taken by `actor`, if it acted this tick.
    pub fn action_of(&self, actor: EntityId) -> Option<Action> {
        self.actions
            .iter()
            .find(|processed| processed.actor == actor)
            .map(|processed| processed.action)
    }

    /// Actions in processing order, without the actors.
    pub fn action_sequence(&self) -> Vec<Action> {
        self.actions.iter().map(|processed| processed.action).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.actions.is_empty()
    }
}
