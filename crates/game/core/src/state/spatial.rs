//! Hashed grid-cell registry of actor handles.
//!
//! The index never owns actors. It maps a cell to the handles standing on it,
//! each tagged with a lightweight [`ActorKind`] discriminator so callers can
//! filter without touching the arena. A reverse map from handle to cell keeps
//! every handle registered at exactly one cell.

use ahash::AHashMap;

use super::{ActorKind, ActorState, EntitiesState, EntityId, Position, StateError};
use crate::config::SimConfig;

/// Back-reference stored in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub id: EntityId,
    pub kind: ActorKind,
}

impl Occupant {
    pub const fn new(id: EntityId, kind: ActorKind) -> Self {
        Self { id, kind }
    }

    pub fn of(actor: &ActorState) -> Self {
        Self::new(actor.id, actor.kind)
    }
}

/// Cell-keyed occupancy registry with O(1) neighbourhood queries.
#[derive(Clone, Debug, Default)]
pub struct SpatialIndex {
    cells: AHashMap<Position, Vec<Occupant>>,
    locations: AHashMap<EntityId, Position>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `occupant` at `position`.
    ///
    /// Idempotent when the handle is already registered at that exact cell.
    /// A handle registered elsewhere is moved, so it never appears twice.
    /// Returns `true` when the index changed.
    pub fn add(&mut self, position: Position, occupant: Occupant) -> bool {
        match self.locations.get(&occupant.id).copied() {
            Some(current) if current == position => return false,
            Some(current) => {
                self.detach(current, occupant.id);
            }
            None => {}
        }

        self.cells
            .entry(position)
            .or_insert_with(|| Vec::with_capacity(SimConfig::INLINE_OCCUPANTS_PER_CELL))
            .push(occupant);
        self.locations.insert(occupant.id, position);
        true
    }

    /// Deregisters `id` from `position`.
    ///
    /// A no-op when the handle is not registered there; death and relocation
    /// may both try to remove the same actor.
    pub fn remove(&mut self, position: Position, id: EntityId) -> bool {
        if self.locations.get(&id) != Some(&position) {
            return false;
        }
        self.detach(position, id);
        self.locations.remove(&id);
        true
    }

    /// Moves `occupant` from `from` to `to`.
    ///
    /// Remove-then-add with no observable intermediate state: after the call
    /// the handle is registered at `to` and nowhere else.
    pub fn relocate(&mut self, from: Position, to: Position, occupant: Occupant) {
        if from == to {
            self.add(to, occupant);
            return;
        }
        self.remove(from, occupant.id);
        self.add(to, occupant);
    }

    /// Occupants of a cell, possibly empty.
    pub fn occupants(&self, position: Position) -> &[Occupant] {
        self.cells
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First occupant of a cell matching `predicate`.
    pub fn find(
        &self,
        position: Position,
        predicate: impl Fn(&Occupant) -> bool,
    ) -> Option<Occupant> {
        self.occupants(position).iter().copied().find(predicate)
    }

    /// True when any occupant of the cell prevents entry.
    pub fn is_blocked(&self, position: Position) -> bool {
        self.occupants(position)
            .iter()
            .any(|occupant| occupant.kind.blocks_entry())
    }

    /// Cell a handle is registered at.
    pub fn position_of(&self, id: EntityId) -> Option<Position> {
        self.locations.get(&id).copied()
    }

    /// Clears the index and registers every live actor.
    ///
    /// Reserved for level load and transitions; steady state uses
    /// [`add`](Self::add), [`remove`](Self::remove) and [`relocate`](Self::relocate).
    pub fn rebuild(&mut self, entities: &EntitiesState) {
        self.cells.clear();
        self.locations.clear();
        for actor in entities.iter() {
            self.add(actor.position, Occupant::of(actor));
        }
    }

    /// Fast path that relocates only the player singleton.
    pub fn update_player(&mut self, player: &ActorState) {
        debug_assert!(player.id.is_player(), "update_player called with {}", player.id);
        self.add(player.position, Occupant::new(EntityId::PLAYER, ActorKind::Player));
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Compares the index against canonical positions.
    pub fn verify(&self, entities: &EntitiesState) -> Result<(), StateError> {
        for actor in entities.iter() {
            let indexed = self.position_of(actor.id);
            if indexed != Some(actor.position) {
                return Err(StateError::IndexDesync {
                    id: actor.id,
                    canonical: actor.position,
                    indexed,
                });
            }
        }
        if self.len() != entities.len() {
            let stale = self
                .locations
                .keys()
                .copied()
                .find(|id| !entities.contains(*id))
                .unwrap_or(EntityId::PLAYER);
            return Err(StateError::StaleIndexEntry { id: stale });
        }
        Ok(())
    }

    /// Panics in debug builds when the index diverges from the arena.
    #[inline]
    pub fn debug_check(&self, entities: &EntitiesState) {
        if cfg!(debug_assertions)
            && let Err(err) = self.verify(entities)
        {
            panic!("spatial index invariant violated: {err}");
        }
    }

    fn detach(&mut self, position: Position, id: EntityId) {
        if let Some(slot) = self.cells.get_mut(&position) {
            slot.retain(|occupant| occupant.id != id);
            if slot.is_empty() {
                self.cells.remove(&position);
            }
        }
    }
}
