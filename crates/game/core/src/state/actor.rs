//! Actor records held in the canonical arena.

use bitflags::bitflags;
use strum::{Display, EnumIter, IntoStaticStr};

use super::{EntityId, Position, ResourceMeter, Tick};
use crate::engine::ActionClock;
use crate::env::EnemyTypeId;

/// Classification of a simulated occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ActorKind {
    Player,
    Enemy,
    Npc,
    Chest,
    Item,
    Obstacle,
}

impl ActorKind {
    /// Kinds that prevent another actor from entering their cell.
    ///
    /// Items are walkable and the player is handled separately by movement.
    pub const fn blocks_entry(self) -> bool {
        matches!(
            self,
            ActorKind::Enemy | ActorKind::Npc | ActorKind::Chest | ActorKind::Obstacle
        )
    }
}

bitflags! {
    /// Player-side buffs the decision engine reacts to.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BuffFlags: u8 {
        /// Enemies lose track of the player and wander.
        const INVISIBLE = 1 << 0;
    }
}

/// Mutable combat-status bundle carried by enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStatus {
    /// Remaining skipped turns.
    pub stunned: u32,
    /// Remaining slowed turns; acting alternates with skipping.
    pub slowed: u32,
    /// Phase bit of the slowed alternation; `true` means this turn is skipped.
    pub slowed_skip: bool,
    /// Remaining poison ticks.
    pub poisoned: u32,
    /// Damage per poison tick; zero falls back to the configured default.
    pub poison_damage: i32,
    pub health: ResourceMeter,
    pub attack: i32,
    pub defense: i32,
    /// Milliseconds between actions.
    pub speed: u64,
}

impl CombatStatus {
    pub fn new(health: i32, attack: i32, defense: i32, speed: u64) -> Self {
        Self {
            health: ResourceMeter::full(health),
            attack,
            defense,
            speed,
            ..Self::default()
        }
    }
}

/// Second state dimension for boss-profile actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossState {
    /// Ability clock; `None` until the boss first acts.
    pub last_summon: Option<Tick>,
    /// Completed summons. The first one waits out the warmup, later ones
    /// the cooldown.
    pub summons: u32,
}

/// A single occupant of the grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub kind: ActorKind,
    pub position: Position,
    /// Catalog entry for enemies.
    pub enemy_type: Option<EnemyTypeId>,
    pub level: u32,
    /// Present on enemies and the player.
    pub combat: Option<CombatStatus>,
    pub buffs: BuffFlags,
    pub clock: ActionClock,
    pub boss: Option<BossState>,
}

impl ActorState {
    /// Creates a bare actor; the arena assigns the final id on insertion.
    pub fn new(kind: ActorKind, position: Position) -> Self {
        Self {
            id: EntityId::PLAYER,
            kind,
            position,
            enemy_type: None,
            level: 1,
            combat: None,
            buffs: BuffFlags::empty(),
            clock: ActionClock::default(),
            boss: None,
        }
    }

    pub fn player(position: Position, health: i32) -> Self {
        Self::new(ActorKind::Player, position).with_combat(CombatStatus::new(health, 0, 0, 0))
    }

    pub fn enemy(enemy_type: EnemyTypeId, position: Position, combat: CombatStatus) -> Self {
        let mut actor = Self::new(ActorKind::Enemy, position).with_combat(combat);
        actor.enemy_type = Some(enemy_type);
        actor.clock = ActionClock::with_interval(combat.speed);
        actor
    }

    pub fn with_combat(mut self, combat: CombatStatus) -> Self {
        self.combat = Some(combat);
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_boss(mut self) -> Self {
        self.boss = Some(BossState::default());
        self
    }

    pub fn with_clock(mut self, clock: ActionClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_enemy(&self) -> bool {
        self.kind == ActorKind::Enemy
    }

    pub fn is_invisible(&self) -> bool {
        self.buffs.contains(BuffFlags::INVISIBLE)
    }

    /// Current health fraction, or full for actors without a combat bundle.
    pub fn health_ratio(&self) -> f32 {
        self.combat.map(|c| c.health.ratio()).unwrap_or(1.0)
    }
}
