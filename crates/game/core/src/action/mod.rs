//! Decision results.
//!
//! An [`Action`] is produced fresh for each eligible actor on each tick and is
//! never persisted. The tick driver applies it; render and audio layers read
//! it from the tick report.

use strum::IntoStaticStr;

use crate::state::Position;

/// Why an actor died during its own decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DeathCause {
    Poison,
}

/// Tagged outcome of one decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    /// Culled: too far from the player to simulate.
    Sleep,
    Stunned,
    /// Skipped turn of the slowed alternation.
    Slowed,
    Move {
        to: Position,
    },
    /// Attack the adjacent player with `power_pct` percent of base attack.
    MeleeAttack {
        power_pct: u32,
    },
    RangedAttack {
        range: u32,
        power_pct: u32,
    },
    /// Aimless step while the player is invisible.
    Wander {
        to: Position,
    },
    WaitConfused,
    /// Awake with nothing useful to do.
    Wait,
    SpecialSummon,
    Died {
        cause: DeathCause,
    },
}

impl Action {
    pub const FULL_POWER: u32 = 100;

    pub const fn melee() -> Self {
        Self::MeleeAttack {
            power_pct: Self::FULL_POWER,
        }
    }

    /// Cell the actor ends up in, for actions that relocate it.
    pub const fn destination(&self) -> Option<Position> {
        match self {
            Self::Move { to } | Self::Wander { to } => Some(*to),
            _ => None,
        }
    }

    pub const fn is_attack(&self) -> bool {
        matches!(self, Self::MeleeAttack { .. } | Self::RangedAttack { .. })
    }

    /// Attacker power for attack actions.
    pub const fn power_pct(&self) -> Option<u32> {
        match self {
            Self::MeleeAttack { power_pct } | Self::RangedAttack { power_pct, .. } => {
                Some(*power_pct)
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_only_for_relocations() {
        let to = Position::new(1, 2);
        assert_eq!(Action::Move { to }.destination(), Some(to));
        assert_eq!(Action::Wander { to }.destination(), Some(to));
        assert_eq!(Action::melee().destination(), None);
    }

    #[test]
    fn attacks_carry_power() {
        let shot = Action::RangedAttack {
            range: 5,
            power_pct: 70,
        };
        assert!(shot.is_attack());
        assert_eq!(shot.power_pct(), Some(70));
        assert!(Action::melee().is_attack());
        assert!(!Action::Wait.is_attack());
        assert_eq!(Action::SpecialSummon.power_pct(), None);
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(Action::WaitConfused.name(), "wait_confused");
        assert_eq!(
            Action::RangedAttack {
                range: 4,
                power_pct: 70
            }
            .name(),
            "ranged_attack"
        );
    }
}
