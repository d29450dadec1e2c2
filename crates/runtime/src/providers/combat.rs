//! Combat resolver seam.
//!
//! The decision engine only decides *that* an attack happens. Damage is the
//! resolver's business; the tick driver calls it once per attack with the
//! two actors and the attacker's effective power.

use game_core::ActorState;
use serde::{Deserialize, Serialize};

/// Attacker stats after the decision's power modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveStats {
    pub attack: i32,
    pub power_pct: u32,
}

impl EffectiveStats {
    pub fn of(attacker: &ActorState, power_pct: u32) -> Self {
        let base = attacker.combat.map_or(0, |combat| combat.attack);
        Self {
            attack: base * power_pct as i32 / 100,
            power_pct,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub damage: i32,
    pub is_critical: bool,
}

/// Pure damage function supplied by the host.
pub trait CombatResolver: Send + Sync {
    fn resolve(
        &self,
        attacker: &ActorState,
        defender: &ActorState,
        stats: EffectiveStats,
    ) -> AttackOutcome;
}

/// Effective attack minus defender defense, never below one. No criticals.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatResolver;

impl CombatResolver for FlatResolver {
    fn resolve(
        &self,
        _attacker: &ActorState,
        defender: &ActorState,
        stats: EffectiveStats,
    ) -> AttackOutcome {
        let defense = defender.combat.map_or(0, |combat| combat.defense);
        AttackOutcome {
            damage: (stats.attack - defense).max(1),
            is_critical: false,
        }
    }
}
