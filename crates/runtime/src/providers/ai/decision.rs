use game_core::{Action, BossState, CombatStatus, EnemyTypeId, EntityId, Position};

/// A sub-actor the tick driver appends once the current tick completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnRequest {
    pub summoner: EntityId,
    pub enemy: EnemyTypeId,
    pub at: Position,
    pub level: u32,
}

/// Everything one decision asks the driver to apply.
///
/// The engine never mutates the world: status counters, the boss ability
/// clock, reserved cells and spawns travel back here alongside the
/// [`Action`].
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub action: Action,
    /// Replacement status bundle after counters ticked down.
    pub status: Option<CombatStatus>,
    /// Replacement boss state.
    pub boss: Option<BossState>,
    /// Cells to reserve for the rest of the tick.
    pub claims: Vec<Position>,
    pub spawns: Vec<SpawnRequest>,
}

impl Decision {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            status: None,
            boss: None,
            claims: Vec::new(),
            spawns: Vec::new(),
        }
    }

    /// `Move` to `cell`, or `Wait` when no cell was found.
    pub fn step_or_wait(cell: Option<Position>) -> Self {
        Self::new(cell.map_or(Action::Wait, |to| Action::Move { to }))
    }

    pub fn with_status(mut self, status: Option<CombatStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_boss(mut self, boss: BossState) -> Self {
        self.boss = Some(boss);
        self
    }

    pub fn claim(mut self, cell: Position) -> Self {
        self.claims.push(cell);
        self
    }
}

impl From<Action> for Decision {
    fn from(action: Action) -> Self {
        Self::new(action)
    }
}
