//! Per-actor readiness clocks.
//!
//! Both scheduling modes share one contract: an actor is eligible when
//! `now - last_action >= interval`. Continuous mode measures `now` in
//! milliseconds and uses each actor's own interval; turn mode passes the
//! player's turn counter and treats every interval as one turn.

use crate::config::SimConfig;
use crate::state::{ActorState, EntitiesState, EntityId, Tick};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SchedulerMode {
    #[default]
    Continuous,
    Turn,
}

/// Readiness state carried by every actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionClock {
    /// `None` until the actor first acts, which makes it immediately eligible.
    pub last_action: Option<Tick>,
    /// Milliseconds between actions, as configured; clamped on use.
    pub interval: u64,
    /// Immunity window; the actor is never eligible before this tick.
    pub not_before: Option<Tick>,
}

impl ActionClock {
    pub const fn with_interval(interval: u64) -> Self {
        Self {
            last_action: None,
            interval,
            not_before: None,
        }
    }

    /// Blocks the actor until `until` (summon sickness).
    pub fn suspend_until(mut self, until: Tick) -> Self {
        self.not_before = Some(until);
        self
    }
}

/// Gates which actors may act on a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionScheduler {
    mode: SchedulerMode,
    min_interval: u64,
}

impl ActionScheduler {
    pub fn new(mode: SchedulerMode, min_interval: u64) -> Self {
        Self {
            mode,
            min_interval: min_interval.max(1),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.scheduler_mode, config.min_action_interval_ms)
    }

    pub fn mode(&self) -> SchedulerMode {
        self.mode
    }

    /// Interval actually applied to `clock` in the current mode.
    pub fn effective_interval(&self, clock: &ActionClock) -> u64 {
        match self.mode {
            SchedulerMode::Turn => 1,
            SchedulerMode::Continuous => clock.interval.max(self.min_interval),
        }
    }

    pub fn is_eligible(&self, clock: &ActionClock, now: Tick) -> bool {
        if clock.not_before.is_some_and(|until| now < until) {
            return false;
        }
        match clock.last_action {
            None => true,
            Some(last) => now >= last && now.since(last) >= self.effective_interval(clock),
        }
    }

    /// Resets the clock so the next eligibility is one interval after `now`.
    pub fn mark_acted(&self, clock: &mut ActionClock, now: Tick) {
        clock.last_action = Some(now);
        clock.not_before = None;
    }

    /// Enemies whose clock has elapsed, in canonical enumeration order.
    pub fn eligible_enemies(&self, entities: &EntitiesState, now: Tick) -> Vec<EntityId> {
        entities
            .enemies()
            .filter(|actor| self.is_actor_eligible(actor, now))
            .map(|actor| actor.id)
            .collect()
    }

    pub fn is_actor_eligible(&self, actor: &ActorState, now: Tick) -> bool {
        self.is_eligible(&actor.clock, now)
    }
}

impl Default for ActionScheduler {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}
