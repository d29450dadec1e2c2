//! Enemy-type table: behavior profile, stats and ability data per type.

use std::collections::BTreeMap;
use std::fmt;

use strum::{Display, EnumIter, IntoStaticStr};

use super::EnvError;
use crate::config::SimConfig;
use crate::engine::ActionClock;
use crate::state::{ActorState, CombatStatus, Position};

/// Concrete enemy-type identifier used by level data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EnemyTypeId(pub u16);

impl fmt::Display for EnemyTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type:{}", self.0)
    }
}

/// Movement policy class of an enemy type.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BehaviorProfile {
    #[default]
    Aggressive,
    Cautious,
    Pack,
    Ambush,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedProfile {
    /// Maximum Manhattan distance of a shot.
    pub range: u32,
    /// Shoots at close range only occasionally.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefer_melee: bool,
}

impl RangedProfile {
    pub const fn new(range: u32, prefer_melee: bool) -> Self {
        Self {
            range,
            prefer_melee,
        }
    }
}

/// Boss-only data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossSpec {
    /// Summonable types with relative weights.
    pub minions: Vec<(EnemyTypeId, u32)>,
}

/// One row of the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyEntry {
    pub id: EnemyTypeId,
    pub name: String,
    pub health: i32,
    pub attack: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: i32,
    /// Overrides the interval derived from the profile.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interval_ms: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile: BehaviorProfile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ranged: Option<RangedProfile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss: Option<BossSpec>,
}

impl EnemyEntry {
    pub fn new(id: EnemyTypeId, name: impl Into<String>, health: i32, attack: i32) -> Self {
        Self {
            id,
            name: name.into(),
            health,
            attack,
            defense: 0,
            interval_ms: None,
            profile: BehaviorProfile::default(),
            ranged: None,
            boss: None,
        }
    }

    pub fn with_profile(mut self, profile: BehaviorProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_ranged(mut self, ranged: RangedProfile) -> Self {
        self.ranged = Some(ranged);
        self
    }

    pub fn with_boss(mut self, boss: BossSpec) -> Self {
        self.profile = BehaviorProfile::Boss;
        self.boss = Some(boss);
        self
    }

    pub fn with_interval(mut self, interval_ms: u64) -> Self {
        self.interval_ms = Some(interval_ms);
        self
    }

    /// Interval between actions: explicit override, else by profile class.
    pub fn action_interval(&self, config: &SimConfig) -> u64 {
        self.interval_ms.unwrap_or(match (self.profile, self.ranged) {
            (BehaviorProfile::Boss, _) => config.boss_action_interval_ms,
            (_, Some(_)) => config.ranged_action_interval_ms,
            _ => config.base_action_interval_ms,
        })
    }
}

/// Lookup table from enemy type to its data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnemyCatalog {
    entries: BTreeMap<EnemyTypeId, EnemyEntry>,
}

impl EnemyCatalog {
    /// Builds a catalog, rejecting duplicate ids and dangling minion references.
    pub fn new(entries: impl IntoIterator<Item = EnemyEntry>) -> Result<Self, EnvError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let id = entry.id;
            if map.insert(id, entry).is_some() {
                return Err(EnvError::DuplicateEnemyType(id));
            }
        }
        for entry in map.values() {
            let minions = entry.boss.iter().flat_map(|boss| boss.minions.iter());
            for (minion, _) in minions {
                if !map.contains_key(minion) {
                    return Err(EnvError::UnknownMinion {
                        boss: entry.id,
                        minion: *minion,
                    });
                }
            }
        }
        Ok(Self { entries: map })
    }

    pub fn entry(&self, id: EnemyTypeId) -> Option<&EnemyEntry> {
        self.entries.get(&id)
    }

    /// Unknown types behave aggressively.
    pub fn profile(&self, id: EnemyTypeId) -> BehaviorProfile {
        self.entry(id).map(|e| e.profile).unwrap_or_default()
    }

    pub fn ranged(&self, id: EnemyTypeId) -> Option<RangedProfile> {
        self.entry(id).and_then(|e| e.ranged)
    }

    pub fn boss(&self, id: EnemyTypeId) -> Option<&BossSpec> {
        self.entry(id).and_then(|e| e.boss.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyEntry> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creates an actor of the given type, ready to be spawned.
    pub fn instantiate(
        &self,
        id: EnemyTypeId,
        position: Position,
        level: u32,
        config: &SimConfig,
    ) -> Result<ActorState, EnvError> {
        let entry = self.entry(id).ok_or(EnvError::UnknownEnemyType(id))?;
        let interval = entry.action_interval(config);
        let combat = CombatStatus::new(entry.health, entry.attack, entry.defense, interval);
        let mut actor = ActorState::enemy(id, position, combat)
            .with_level(level)
            .with_clock(ActionClock::with_interval(interval));
        if entry.profile == BehaviorProfile::Boss {
            actor = actor.with_boss();
        }
        Ok(actor)
    }
}
