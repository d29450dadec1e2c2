use super::{ActorKind, ActorState, EntityId, Position, StateError};

/// Canonical actor list, stored as an arena indexed by [`EntityId`].
///
/// Slot `n` holds the actor with handle `n`; removal leaves a hole so handles
/// held elsewhere (the spatial index, pending decisions) never alias a
/// different actor. Iteration follows ascending handle order, which is the
/// order actors were appended and therefore the canonical enumeration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntitiesState {
    slots: Vec<Option<ActorState>>,
    live: usize,
}

impl EntitiesState {
    /// Creates an empty arena with the player slot reserved.
    pub fn empty() -> Self {
        Self {
            slots: vec![None],
            live: 0,
        }
    }

    /// Creates an arena holding only the player.
    pub fn with_player(mut player: ActorState) -> Self {
        player.id = EntityId::PLAYER;
        player.kind = ActorKind::Player;
        Self {
            slots: vec![Some(player)],
            live: 1,
        }
    }

    /// Installs (or replaces) the player singleton.
    pub fn set_player(&mut self, mut player: ActorState) {
        player.id = EntityId::PLAYER;
        player.kind = ActorKind::Player;
        if self.slots.is_empty() {
            self.slots.push(None);
        }
        if self.slots[0].replace(player).is_none() {
            self.live += 1;
        }
    }

    /// Appends a non-player actor and returns its freshly allocated handle.
    pub fn push(&mut self, mut actor: ActorState) -> EntityId {
        if self.slots.is_empty() {
            self.slots.push(None);
        }
        let id = EntityId(self.slots.len() as u32);
        actor.id = id;
        self.slots.push(Some(actor));
        self.live += 1;
        id
    }

    /// Handle the next [`push`](Self::push) will allocate.
    pub fn next_id(&self) -> EntityId {
        EntityId(self.slots.len().max(1) as u32)
    }

    /// Removes an actor, returning it if it was present.
    pub fn remove(&mut self, id: EntityId) -> Option<ActorState> {
        let removed = self.slots.get_mut(id.0 as usize)?.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.slots.get_mut(id.0 as usize)?.as_mut()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.actor(id).is_some()
    }

    pub fn player(&self) -> Result<&ActorState, StateError> {
        self.actor(EntityId::PLAYER).ok_or(StateError::PlayerMissing)
    }

    /// All live actors in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorState> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Live enemies in canonical order.
    pub fn enemies(&self) -> impl Iterator<Item = &ActorState> + '_ {
        self.iter().filter(|actor| actor.is_enemy())
    }

    /// Live actors standing on `position`, found by scanning the arena.
    ///
    /// Linear in the arena size; the spatial index answers the same query
    /// per cell.
    pub fn scan_cell(&self, position: Position) -> impl Iterator<Item = &ActorState> + '_ {
        self.iter().filter(move |actor| actor.position == position)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
