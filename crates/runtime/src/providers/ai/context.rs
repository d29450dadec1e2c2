//! Read-only decision context.
//!
//! The [`AiContext`] is the blackboard for one actor's decision on one tick.
//! It borrows the world snapshot the tick driver holds between applied
//! actions, so every decision observes the post-move positions of the actors
//! processed earlier in the same tick.

use ahash::AHashMap;
use game_core::{
    ActorState, BehaviorProfile, DecisionRng, EnemyEntry, EntityId, Env, GameState, Position,
    RangedProfile, SimConfig, Tick,
};

/// Cells claimed earlier in the current tick.
///
/// Flank targets and pending spawn cells are claimed here so that no other
/// actor plans into them before the tick ends. Cleared by the driver at the
/// start of every tick.
#[derive(Clone, Debug, Default)]
pub struct Reservations {
    cells: AHashMap<Position, EntityId>,
}

impl Reservations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `cell` for `owner`. The first claim wins; returns `false` when
    /// another actor already holds the cell.
    pub fn reserve(&mut self, cell: Position, owner: EntityId) -> bool {
        match self.cells.get(&cell) {
            Some(holder) => *holder == owner,
            None => {
                self.cells.insert(cell, owner);
                true
            }
        }
    }

    pub fn holder(&self, cell: Position) -> Option<EntityId> {
        self.cells.get(&cell).copied()
    }

    pub fn is_reserved_for_other(&self, cell: Position, id: EntityId) -> bool {
        self.holder(cell).is_some_and(|holder| holder != id)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Context for one actor's decision.
///
/// # Randomness
///
/// `rng` is seeded from the game seed, the tick and the actor handle, so the
/// same snapshot always yields the same choices. Decisions take the context
/// mutably only to advance this stream.
pub struct AiContext<'a> {
    /// The deciding actor.
    pub actor: &'a ActorState,

    /// The player singleton, the only target enemies pursue.
    pub player: &'a ActorState,

    /// Canonical actors and the spatial index.
    pub state: &'a GameState,

    /// Terrain, visibility, enemy catalog and configuration.
    pub env: Env<'a>,

    pub now: Tick,

    pub rng: DecisionRng,

    reservations: &'a Reservations,
}

impl<'a> AiContext<'a> {
    pub fn new(
        actor: &'a ActorState,
        player: &'a ActorState,
        state: &'a GameState,
        env: Env<'a>,
        now: Tick,
        reservations: &'a Reservations,
    ) -> Self {
        let rng = DecisionRng::for_decision(state.game_seed, now.0, actor.id.0, 0);
        Self {
            actor,
            player,
            state,
            env,
            now,
            rng,
            reservations,
        }
    }

    #[inline]
    pub fn config(&self) -> &'a SimConfig {
        self.env.config
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.actor.position
    }

    #[inline]
    pub fn player_position(&self) -> Position {
        self.player.position
    }

    /// Manhattan distance to the player.
    #[inline]
    pub fn distance(&self) -> u32 {
        self.actor.position.manhattan(self.player.position)
    }

    /// Whether the player currently sees the actor's cell.
    pub fn can_see(&self) -> bool {
        self.env.is_visible(self.actor.position)
    }

    pub fn entry(&self) -> Option<&'a EnemyEntry> {
        self.actor
            .enemy_type
            .and_then(|id| self.env.catalog.entry(id))
    }

    pub fn profile(&self) -> BehaviorProfile {
        self.entry().map(|entry| entry.profile).unwrap_or_default()
    }

    pub fn ranged(&self) -> Option<RangedProfile> {
        self.entry().and_then(|entry| entry.ranged)
    }

    /// A cell the actor may step into this tick: walkable terrain, no
    /// blocking occupant, not the player, not claimed by someone else.
    pub fn is_open(&self, cell: Position) -> bool {
        self.env.is_passable(cell)
            && !self.state.is_blocked(cell)
            && cell != self.player.position
            && !self.reservations.is_reserved_for_other(cell, self.actor.id)
    }

    pub fn reservations(&self) -> &'a Reservations {
        self.reservations
    }
}
