//! Per-actor decision state machine.
//!
//! The engine is a pure function from an [`AiContext`] to a [`Decision`].
//! Transitions short-circuit in a fixed order:
//!
//! 1. culling by distance to the player
//! 2. status gate (stunned, slowed, poisoned)
//! 3. evasion while the player is invisible
//! 4. boss delegation
//! 5. melee when adjacent
//! 6. ranged shot when in range with clear sight
//! 7. movement by behavior profile
//!
//! Nothing here fails: a missing path or a blocked cell degrades to a weaker
//! action.

use game_core::{Action, BehaviorProfile, DeathCause, Position, SimConfig};
use tracing::trace;

use super::boss::BossController;
use super::context::AiContext;
use super::decision::Decision;
use super::movement::{lateral_step, move_away, move_toward, random_step};
use super::sight::has_line_of_sight;
use super::tactics::{TacticalScorer, opposes};

#[derive(Clone, Copy, Debug, Default)]
pub struct BehaviorEngine {
    boss: BossController,
}

impl BehaviorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide(&self, ctx: &mut AiContext<'_>) -> Decision {
        let decision = self.evaluate(ctx);
        trace!(
            actor = %ctx.actor.id,
            action = decision.action.name(),
            "decided"
        );
        decision
    }

    fn evaluate(&self, ctx: &mut AiContext<'_>) -> Decision {
        let config = ctx.config();
        let profile = ctx.profile();

        let radius = match profile {
            BehaviorProfile::Boss => config.boss_activation_radius,
            _ => config.activation_radius,
        };
        if ctx.distance() > radius {
            return Action::Sleep.into();
        }

        let mut status = ctx.actor.combat;
        if let Some(combat) = status.as_mut() {
            if combat.stunned > 0 {
                combat.stunned -= 1;
                return Decision::new(Action::Stunned).with_status(status);
            }
            if combat.slowed > 0 {
                combat.slowed_skip = !combat.slowed_skip;
                combat.slowed -= 1;
                if combat.slowed_skip {
                    return Decision::new(Action::Slowed).with_status(status);
                }
            }
            if combat.poisoned > 0 {
                let damage = if combat.poison_damage > 0 {
                    combat.poison_damage
                } else {
                    config.default_poison_damage
                };
                combat.health.current -= damage;
                combat.poisoned -= 1;
                if combat.health.is_depleted() {
                    let cause = DeathCause::Poison;
                    return Decision::new(Action::Died { cause }).with_status(status);
                }
            }
        }

        let decision = if ctx.player.is_invisible() {
            match random_step(ctx) {
                Some(to) => Action::Wander { to }.into(),
                None => Action::WaitConfused.into(),
            }
        } else if profile == BehaviorProfile::Boss {
            self.boss.decide(ctx)
        } else {
            self.engage(ctx, profile)
        };
        decision.with_status(status)
    }

    fn engage(&self, ctx: &mut AiContext<'_>, profile: BehaviorProfile) -> Decision {
        if ctx.distance() == 1 {
            return Action::melee().into();
        }
        if let Some(shot) = ranged_shot(ctx) {
            return shot.into();
        }

        let config = ctx.config();
        let dist = ctx.distance();
        let player = ctx.player_position();
        match profile {
            BehaviorProfile::Aggressive | BehaviorProfile::Boss => {
                if ctx.can_see() || dist <= config.pathfinding_radius {
                    Decision::step_or_wait(move_toward(ctx, player))
                } else {
                    Action::Wait.into()
                }
            }
            BehaviorProfile::Ambush => {
                if dist <= config.ambush_trigger_radius {
                    Decision::step_or_wait(move_toward(ctx, player))
                } else {
                    Action::Wait.into()
                }
            }
            BehaviorProfile::Cautious => cautious(ctx),
            BehaviorProfile::Pack => pack(ctx),
        }
    }
}

/// Standard shot gate. Melee-preferring shooters fire at close range only
/// occasionally.
fn ranged_shot(ctx: &mut AiContext<'_>) -> Option<Action> {
    let ranged = ctx.ranged()?;
    let dist = ctx.distance();
    if dist <= 1 || dist > ranged.range {
        return None;
    }
    if !has_line_of_sight(ctx.env.map, ctx.position(), ctx.player_position()) {
        return None;
    }
    let config = ctx.config();
    let fire = !ranged.prefer_melee
        || dist > SimConfig::CLOSE_RANGE_BAND
        || ctx.rng.chance(config.melee_preference_shot_pct);
    fire.then_some(Action::RangedAttack {
        range: ranged.range,
        power_pct: config.ranged_damage_pct,
    })
}

/// Keeps an optimal range band around the player.
fn cautious(ctx: &mut AiContext<'_>) -> Decision {
    let config = ctx.config();
    let dist = ctx.distance();
    let can_see = ctx.can_see();
    let player = ctx.player_position();
    let ranged = ctx.ranged();
    let optimal = ranged.map_or(SimConfig::DEFAULT_CAUTIOUS_RANGE, |r| r.range * 7 / 10);

    let step = if dist <= 2 {
        move_away(ctx, player)
    } else if dist < optimal && can_see {
        if ctx.rng.chance(config.retreat_chance_pct) {
            move_away(ctx, player)
        } else {
            None
        }
    } else if dist > optimal + 2 && can_see {
        move_toward(ctx, player)
    } else if can_see && ctx.rng.chance(config.strafe_chance_pct) {
        lateral_step(ctx, player)
    } else {
        None
    };
    if let Some(to) = step {
        return Action::Move { to }.into();
    }

    // Cornered or holding the band: shoot if possible.
    if let Some(ranged) = ranged
        && can_see
        && dist <= ranged.range
        && has_line_of_sight(ctx.env.map, ctx.position(), player)
    {
        return Action::RangedAttack {
            range: ranged.range,
            power_pct: config.ranged_damage_pct,
        }
        .into();
    }
    Action::Wait.into()
}

/// Pursues through a flanking cell when pack allies are around.
fn pack(ctx: &mut AiContext<'_>) -> Decision {
    let dist = ctx.distance();
    if !ctx.can_see() && dist > ctx.config().pack_flanking_radius {
        return Action::Wait.into();
    }
    if let Some(target) = flank_target(ctx)
        && let Some(to) = move_toward(ctx, target)
    {
        return Decision::new(Action::Move { to }).claim(target);
    }
    Decision::step_or_wait(move_toward(ctx, ctx.player_position()))
}

/// Best open cell beside the player whose direction opposes a pack ally's.
///
/// Candidates are ranked by tactical score minus travel distance; ties keep
/// the ring enumeration order. `None` when there are no allies, no candidate,
/// or the actor already stands on a flanking cell.
pub fn flank_target(ctx: &AiContext<'_>) -> Option<Position> {
    let player = ctx.player_position();
    let radius = ctx.config().pack_flanking_radius;
    let catalog = ctx.env.catalog;
    let allies: Vec<(i32, i32)> = ctx
        .state
        .entities()
        .enemies()
        .filter(|other| other.id != ctx.actor.id)
        .filter(|other| other.position.manhattan(player) <= radius)
        .filter(|other| {
            other
                .enemy_type
                .is_some_and(|kind| catalog.profile(kind) == BehaviorProfile::Pack)
        })
        .map(|other| player.direction_to(other.position))
        .collect();
    if allies.is_empty() {
        return None;
    }

    let is_flank = |cell: Position| {
        let direction = player.direction_to(cell);
        allies.iter().any(|&ally| opposes(direction, ally))
    };
    let here = ctx.position();
    if here.chebyshev(player) == 1 && is_flank(here) {
        return None;
    }

    let scorer = TacticalScorer::new(ctx.env.map);
    let threats = [player];
    let mut best: Option<(i32, Position)> = None;
    for cell in player.ring_neighbors() {
        if !ctx.is_open(cell) || !is_flank(cell) {
            continue;
        }
        let value = scorer.score(cell, &threats) - here.manhattan(cell) as i32;
        if best.is_none_or(|(top, _)| value > top) {
            best = Some((value, cell));
        }
    }
    best.map(|(_, cell)| cell)
}
