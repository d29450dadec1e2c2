//! Boss controller.
//!
//! Bosses carry a second state dimension: rage, derived from the health
//! ratio, and an ability clock for summons. A summon is attempted before
//! anything else each eligible tick; a failed attempt leaves the clock alone
//! so the boss retries on its next turn.

use arrayvec::ArrayVec;
use game_core::{Action, ActorState, Position, SimConfig, Tick};
use tracing::debug;

use super::context::AiContext;
use super::decision::{Decision, SpawnRequest};
use super::movement::{lateral_step, move_away, move_toward};
use super::sight::has_line_of_sight;

#[derive(Clone, Copy, Debug, Default)]
pub struct BossController;

impl BossController {
    pub fn new() -> Self {
        Self
    }

    pub fn is_enraged(actor: &ActorState, config: &SimConfig) -> bool {
        actor.health_ratio() < config.enrage_threshold
    }

    /// Clock units the boss must wait after its last summon (or after first
    /// waking, before the first summon).
    pub fn summon_wait(actor: &ActorState, config: &SimConfig) -> u64 {
        let state = actor.boss.unwrap_or_default();
        let ms = if state.summons == 0 {
            config.summon_warmup_ms
        } else {
            config.summon_cooldown(Self::is_enraged(actor, config))
        };
        config.ability_span(ms)
    }

    /// Whether the ability clock has elapsed at `now`.
    pub fn summon_ready(actor: &ActorState, config: &SimConfig, now: Tick) -> bool {
        actor
            .boss
            .and_then(|state| state.last_summon)
            .is_some_and(|last| now.since(last) >= Self::summon_wait(actor, config))
    }

    pub fn decide(&self, ctx: &mut AiContext<'_>) -> Decision {
        let config = ctx.config();
        let enraged = Self::is_enraged(ctx.actor, config);
        let mut state = ctx.actor.boss.unwrap_or_default();
        if state.last_summon.is_none() {
            state.last_summon = Some(ctx.now);
        }

        if Self::summon_ready(ctx.actor, config, ctx.now)
            && let Some(decision) = self.try_summon(ctx, enraged)
        {
            state.last_summon = Some(ctx.now);
            state.summons += 1;
            return decision.with_boss(state);
        }

        self.engage(ctx, enraged).with_boss(state)
    }

    fn try_summon(&self, ctx: &mut AiContext<'_>, enraged: bool) -> Option<Decision> {
        let spec = ctx.entry()?.boss.as_ref()?;
        if spec.minions.is_empty() {
            return None;
        }

        let mut cells: ArrayVec<Position, 8> = ctx
            .position()
            .ring_neighbors()
            .into_iter()
            .filter(|&cell| ctx.is_open(cell))
            .collect();
        if cells.is_empty() {
            debug!(boss = %ctx.actor.id, "summon skipped: no open cell");
            return None;
        }
        ctx.rng.shuffle(&mut cells);

        let quota = ctx.config().summon_quota(enraged) as usize;
        let mut decision = Decision::new(Action::SpecialSummon);
        for cell in cells.into_iter().take(quota) {
            let Some(&enemy) = ctx.rng.weighted(&spec.minions) else {
                break;
            };
            decision.spawns.push(SpawnRequest {
                summoner: ctx.actor.id,
                enemy,
                at: cell,
                level: ctx.actor.level,
            });
            decision.claims.push(cell);
        }
        (!decision.spawns.is_empty()).then_some(decision)
    }

    fn engage(&self, ctx: &mut AiContext<'_>, enraged: bool) -> Decision {
        let config = ctx.config();
        let dist = ctx.distance();
        let player = ctx.player_position();

        if dist == 1 {
            let power_pct = if enraged {
                config.enraged_damage_pct
            } else {
                Action::FULL_POWER
            };
            return Action::MeleeAttack { power_pct }.into();
        }

        let ranged = ctx.ranged();
        if let Some(ranged) = ranged
            && dist <= ranged.range
            && has_line_of_sight(ctx.env.map, ctx.position(), player)
        {
            let fire = if ranged.prefer_melee {
                dist > SimConfig::CLOSE_RANGE_BAND
                    || ctx.rng.chance(config.melee_preference_shot_pct)
            } else {
                ctx.rng.chance(config.caster_shot_pct)
            };
            if fire {
                return Action::RangedAttack {
                    range: ranged.range,
                    power_pct: config.ranged_damage_pct,
                }
                .into();
            }
        }

        let step = if enraged {
            move_toward(ctx, player)
        } else if ranged.is_some_and(|r| !r.prefer_melee) {
            let optimal = config.caster_optimal_range;
            if dist + 1 < optimal {
                move_away(ctx, player)
            } else if dist > optimal + 1 {
                move_toward(ctx, player)
            } else {
                lateral_step(ctx, player)
            }
        } else if dist <= 2 && ctx.rng.chance(config.feint_chance_pct) {
            move_away(ctx, player).or_else(|| move_toward(ctx, player))
        } else {
            move_toward(ctx, player)
        };
        Decision::step_or_wait(step)
    }
}
