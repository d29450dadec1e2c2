use crate::engine::SchedulerMode;

/// Simulation constants and tunable parameters.
///
/// Every field has a default, so data files only need to list overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Manhattan radius around the player beyond which actors sleep.
    pub activation_radius: u32,
    /// Culling radius for boss-profile actors.
    pub boss_activation_radius: u32,
    /// A* is only attempted when the target lies within this Manhattan
    /// distance; the search window is bounded by the same radius.
    pub pathfinding_radius: u32,
    pub ambush_trigger_radius: u32,
    /// Pack allies within this distance of the player take part in flanking.
    pub pack_flanking_radius: u32,
    /// Radius of the player's field of view when the session computes it.
    pub sight_radius: u32,

    pub base_action_interval_ms: u64,
    pub ranged_action_interval_ms: u64,
    pub boss_action_interval_ms: u64,
    /// Lower clamp applied to every interval.
    pub min_action_interval_ms: u64,
    pub scheduler_mode: SchedulerMode,

    /// Health fraction below which a boss is enraged.
    pub enrage_threshold: f32,
    pub summon_cooldown_ms: u64,
    pub enraged_summon_cooldown_ms: u64,
    pub summon_count: u32,
    pub enraged_summon_count: u32,
    pub summon_warmup_ms: u64,
    pub summon_sickness_ms: u64,
    pub enraged_damage_pct: u32,
    pub ranged_damage_pct: u32,

    pub default_poison_damage: i32,
    pub retreat_chance_pct: u32,
    pub strafe_chance_pct: u32,
    pub feint_chance_pct: u32,
    pub melee_preference_shot_pct: u32,
    pub caster_shot_pct: u32,
    pub caster_optimal_range: u32,
}

impl SimConfig {
    // ===== compile-time constants =====
    /// Upper bound on simultaneous occupants kept inline per cell.
    pub const INLINE_OCCUPANTS_PER_CELL: usize = 4;
    /// Distance at which a melee-preferring shooter always fires.
    pub const CLOSE_RANGE_BAND: u32 = 3;
    /// Cautious actors without a ranged profile keep this range.
    pub const DEFAULT_CAUTIOUS_RANGE: u32 = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ACTIVATION_RADIUS: u32 = 25;
    pub const DEFAULT_BOSS_ACTIVATION_RADIUS: u32 = 40;
    pub const DEFAULT_PATHFINDING_RADIUS: u32 = 12;
    pub const DEFAULT_ACTION_INTERVAL_MS: u64 = 350;

    pub fn new() -> Self {
        Self {
            activation_radius: Self::DEFAULT_ACTIVATION_RADIUS,
            boss_activation_radius: Self::DEFAULT_BOSS_ACTIVATION_RADIUS,
            pathfinding_radius: Self::DEFAULT_PATHFINDING_RADIUS,
            ambush_trigger_radius: 4,
            pack_flanking_radius: 8,
            sight_radius: 8,
            base_action_interval_ms: Self::DEFAULT_ACTION_INTERVAL_MS,
            ranged_action_interval_ms: 500,
            boss_action_interval_ms: 450,
            min_action_interval_ms: 50,
            scheduler_mode: SchedulerMode::Continuous,
            enrage_threshold: 0.3,
            summon_cooldown_ms: 12_000,
            enraged_summon_cooldown_ms: 8_000,
            summon_count: 1,
            enraged_summon_count: 2,
            summon_warmup_ms: 2_000,
            summon_sickness_ms: 1_000,
            enraged_damage_pct: 150,
            ranged_damage_pct: 70,
            default_poison_damage: 3,
            retreat_chance_pct: 60,
            strafe_chance_pct: 20,
            feint_chance_pct: 30,
            melee_preference_shot_pct: 30,
            caster_shot_pct: 70,
            caster_optimal_range: 5,
        }
    }

    pub fn with_activation_radius(mut self, radius: u32) -> Self {
        self.activation_radius = radius;
        self
    }

    pub fn with_pathfinding_radius(mut self, radius: u32) -> Self {
        self.pathfinding_radius = radius;
        self
    }

    pub fn with_scheduler_mode(mut self, mode: SchedulerMode) -> Self {
        self.scheduler_mode = mode;
        self
    }

    /// Summon cooldown for the given rage state.
    pub fn summon_cooldown(&self, enraged: bool) -> u64 {
        if enraged {
            self.enraged_summon_cooldown_ms
        } else {
            self.summon_cooldown_ms
        }
    }

    /// Converts a millisecond ability timer into clock units.
    ///
    /// Continuous mode counts milliseconds. Turn mode counts turns, one per
    /// base action interval, rounded up and never below one.
    pub fn ability_span(&self, ms: u64) -> u64 {
        match self.scheduler_mode {
            SchedulerMode::Continuous => ms,
            SchedulerMode::Turn => ms.div_ceil(self.base_action_interval_ms.max(1)).max(1),
        }
    }

    /// Number of sub-actors per summon for the given rage state.
    pub fn summon_quota(&self, enraged: bool) -> u32 {
        if enraged {
            self.enraged_summon_count
        } else {
            self.summon_count
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
