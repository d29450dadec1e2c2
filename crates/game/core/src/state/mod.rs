//! Authoritative simulation state.
//!
//! [`EntitiesState`] is the canonical actor list; [`SpatialIndex`] is a derived
//! cell registry kept in lock-step with it. Every position change goes through
//! [`GameState`] so the two can never drift apart.
mod actor;
mod common;
mod entities;
mod error;
mod spatial;

pub use actor::{ActorKind, ActorState, BossState, BuffFlags, CombatStatus};
pub use common::{EntityId, Position, ResourceMeter, Tick};
pub use entities::EntitiesState;
pub use error::StateError;
pub use spatial::{Occupant, SpatialIndex};

/// Canonical snapshot of the simulation.
#[derive(Clone, Debug)]
pub struct GameState {
    /// RNG seed set once when the level is loaded.
    pub game_seed: u64,
    entities: EntitiesState,
    spatial: SpatialIndex,
}

impl GameState {
    /// Wraps an arena and builds its spatial index.
    pub fn new(game_seed: u64, entities: EntitiesState) -> Self {
        let mut spatial = SpatialIndex::new();
        spatial.rebuild(&entities);
        Self {
            game_seed,
            entities,
            spatial,
        }
    }

    pub fn entities(&self) -> &EntitiesState {
        &self.entities
    }

    pub fn spatial(&self) -> &SpatialIndex {
        &self.spatial
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.entities.actor(id)
    }

    pub fn player(&self) -> Result<&ActorState, StateError> {
        self.entities.player()
    }

    /// Mutable access to fields other than position.
    ///
    /// Position changes must use [`move_actor`](Self::move_actor).
    pub fn update_actor<R>(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut ActorState) -> R,
    ) -> Result<R, StateError> {
        let actor = self
            .entities
            .actor_mut(id)
            .ok_or(StateError::ActorNotFound(id))?;
        let before = actor.position;
        let result = f(actor);
        debug_assert_eq!(before, actor.position, "update_actor must not move {id}");
        Ok(result)
    }

    /// Appends an actor to the arena and registers it in the index.
    pub fn spawn(&mut self, actor: ActorState) -> EntityId {
        let position = actor.position;
        let kind = actor.kind;
        let id = self.entities.push(actor);
        self.spatial.add(position, Occupant::new(id, kind));
        id
    }

    /// Removes an actor from both structures; repeated calls are no-ops.
    pub fn despawn(&mut self, id: EntityId) -> Option<ActorState> {
        let removed = self.entities.remove(id)?;
        self.spatial.remove(removed.position, id);
        Some(removed)
    }

    /// Moves an actor and its index entry together, returning the origin.
    pub fn move_actor(&mut self, id: EntityId, to: Position) -> Result<Position, StateError> {
        let actor = self
            .entities
            .actor_mut(id)
            .ok_or(StateError::ActorNotFound(id))?;
        let from = actor.position;
        actor.position = to;
        let occupant = Occupant::of(actor);
        if id.is_player() {
            self.spatial.update_player(actor);
        } else {
            self.spatial.relocate(from, to, occupant);
        }
        Ok(from)
    }

    pub fn move_player(&mut self, to: Position) -> Result<Position, StateError> {
        self.move_actor(EntityId::PLAYER, to)
    }

    /// Rebuilds the index from scratch after a bulk change such as a level load.
    pub fn replace_entities(&mut self, entities: EntitiesState) {
        self.entities = entities;
        self.spatial.rebuild(&self.entities);
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        self.spatial.is_blocked(position)
    }

    /// Handle the next [`spawn`](Self::spawn) will allocate.
    pub fn next_id(&self) -> EntityId {
        self.entities.next_id()
    }

    /// Verifies that every actor is indexed at its canonical position.
    pub fn verify(&self) -> Result<(), StateError> {
        self.spatial.verify(&self.entities)
    }

    #[inline]
    pub fn debug_check(&self) {
        self.spatial.debug_check(&self.entities);
    }
}
