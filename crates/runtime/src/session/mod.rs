//! Session state and the tick driver.
//!
//! A [`Session`] owns the canonical actor arena, the spatial index, the
//! terrain and the catalog. [`Session::tick`] is the only place enemy state
//! is mutated, following one discipline: decide against the current
//! snapshot, then apply. Each applied move lands in the spatial index before
//! the next actor decides.

mod report;

pub use report::{ProcessedAction, TickReport};

use tracing::{debug, info, warn};

use game_core::{
    Action, ActionScheduler, ActorState, BuffFlags, EnemyCatalog, EntitiesState, EntityId, Env,
    GameState, GridMap, MapOracle, Occupant, Position, SimConfig, StateError, Tick,
    VisibilityGrid,
};

use crate::api::{Result, RuntimeError};
use crate::providers::ai::{AiContext, Reservations, field_of_view};
use crate::providers::{
    BehaviorEngine, CombatResolver, Decision, EffectiveStats, FlatResolver, SpawnRequest,
};

/// Terrain and actors for one level.
#[derive(Clone, Debug)]
pub struct LevelSetup {
    pub map: GridMap,
    pub entities: EntitiesState,
    pub seed: u64,
}

impl LevelSetup {
    pub fn new(map: GridMap, entities: EntitiesState, seed: u64) -> Self {
        Self {
            map,
            entities,
            seed,
        }
    }
}

/// Who maintains the visibility grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VisibilitySource {
    /// Recomputed from the player's position with `sight_radius`.
    Computed,
    /// Supplied by the host through [`Session::set_visibility`].
    Supplied,
}

pub struct Session {
    state: GameState,
    map: GridMap,
    visibility: VisibilityGrid,
    visibility_source: VisibilitySource,
    catalog: EnemyCatalog,
    config: SimConfig,
    scheduler: ActionScheduler,
    engine: BehaviorEngine,
    resolver: Box<dyn CombatResolver>,
    reservations: Reservations,
}

impl Session {
    pub fn new(level: LevelSetup, catalog: EnemyCatalog, config: SimConfig) -> Self {
        let LevelSetup {
            map,
            entities,
            seed,
        } = level;
        let visibility = VisibilityGrid::hidden(map.dimensions());
        let mut session = Self {
            state: GameState::new(seed, entities),
            map,
            visibility,
            visibility_source: VisibilitySource::Computed,
            catalog,
            scheduler: ActionScheduler::from_config(&config),
            config,
            engine: BehaviorEngine::new(),
            resolver: Box::new(FlatResolver),
            reservations: Reservations::new(),
        };
        session.refresh_visibility();
        session
    }

    pub fn with_resolver(mut self, resolver: impl CombatResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn visibility(&self) -> &VisibilityGrid {
        &self.visibility
    }

    pub fn catalog(&self) -> &EnemyCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Occupants of a cell, for UI interaction queries.
    pub fn occupants(&self, position: Position) -> Vec<Occupant> {
        self.state.spatial().occupants(position).to_vec()
    }

    /// Replaces terrain and actors and rebuilds the spatial index.
    pub fn load_level(&mut self, level: LevelSetup) {
        let LevelSetup {
            map,
            entities,
            seed,
        } = level;
        info!(
            actors = entities.len(),
            width = map.dimensions().width,
            height = map.dimensions().height,
            "level loaded"
        );
        self.map = map;
        self.state = GameState::new(seed, entities);
        self.reservations.clear();
        // A supplied grid describes the old terrain.
        self.visibility_source = VisibilitySource::Computed;
        self.visibility = VisibilityGrid::hidden(self.map.dimensions());
        self.refresh_visibility();
        self.state.debug_check();
    }

    /// Moves the player through the index fast path.
    pub fn move_player(&mut self, to: Position) -> Result<Position> {
        if !self.map.is_passable(to) {
            return Err(RuntimeError::ImpassableTerrain { position: to });
        }
        if self.state.is_blocked(to) {
            return Err(StateError::CellBlocked { position: to }.into());
        }
        let from = self.state.move_player(to)?;
        self.refresh_visibility();
        self.state.debug_check();
        Ok(from)
    }

    pub fn set_player_invisible(&mut self, invisible: bool) -> Result<()> {
        self.state.update_actor(EntityId::PLAYER, |player| {
            player.buffs.set(BuffFlags::INVISIBLE, invisible);
        })?;
        Ok(())
    }

    /// Installs a host-computed visibility grid; the session stops computing
    /// its own until the next level load.
    pub fn set_visibility(&mut self, grid: VisibilityGrid) {
        self.visibility = grid;
        self.visibility_source = VisibilitySource::Supplied;
    }

    /// Applies host-side damage (player attacks, traps) to an actor.
    ///
    /// An actor whose health reaches zero is removed from the arena and the
    /// index at once and returned.
    pub fn damage_actor(&mut self, id: EntityId, amount: i32) -> Result<Option<ActorState>> {
        let depleted = self.state.update_actor(id, |actor| {
            actor.combat.as_mut().is_some_and(|combat| {
                combat.health.current -= amount;
                combat.health.is_depleted()
            })
        })?;
        if !depleted || id.is_player() {
            return Ok(None);
        }
        let removed = self.state.despawn(id);
        self.state.debug_check();
        Ok(removed)
    }

    /// Processes every eligible enemy once, in canonical order.
    ///
    /// All eligible actors have their clocks reset up front, culled ones
    /// included. Spawns are appended after the loop and player damage is
    /// applied last.
    pub fn tick(&mut self, now: Tick) -> Result<TickReport> {
        let mut report = TickReport::new(now);
        self.reservations.clear();

        let scheduler = self.scheduler;
        let eligible = scheduler.eligible_enemies(self.state.entities(), now);
        for &id in &eligible {
            self.state
                .update_actor(id, |actor| scheduler.mark_acted(&mut actor.clock, now))?;
        }

        let mut pending = Vec::new();
        for id in eligible {
            let Some(decision) = self.decide(id, now)? else {
                continue;
            };
            self.apply(id, decision, &mut report, &mut pending)?;
            self.state.debug_check();
        }

        self.spawn_pending(pending, now, &mut report);
        self.apply_player_damage(&mut report)?;

        debug!(
            now = %now,
            acted = report.actions.len(),
            spawned = report.spawned.len(),
            removed = report.removed.len(),
            player_damage = report.player_damage,
            "tick processed"
        );
        Ok(report)
    }

    fn decide(&self, id: EntityId, now: Tick) -> Result<Option<Decision>> {
        let Some(actor) = self.state.actor(id) else {
            return Ok(None);
        };
        let player = self.state.player()?;
        let env = Env::new(&self.map, &self.visibility, &self.catalog, &self.config);
        let mut ctx = AiContext::new(actor, player, &self.state, env, now, &self.reservations);
        Ok(Some(self.engine.decide(&mut ctx)))
    }

    fn apply(
        &mut self,
        id: EntityId,
        decision: Decision,
        report: &mut TickReport,
        pending: &mut Vec<SpawnRequest>,
    ) -> Result<()> {
        let Decision {
            action,
            status,
            boss,
            claims,
            spawns,
        } = decision;

        if status.is_some() || boss.is_some() {
            self.state.update_actor(id, |actor| {
                if status.is_some() {
                    actor.combat = status;
                }
                if boss.is_some() {
                    actor.boss = boss;
                }
            })?;
        }
        for cell in claims {
            self.reservations.reserve(cell, id);
        }
        pending.extend(spawns);

        let mut outcome = None;
        match action {
            Action::Move { to } | Action::Wander { to } => {
                debug_assert!(
                    !self.state.is_blocked(to),
                    "{id} proposed blocked cell {to}"
                );
                self.state.move_actor(id, to)?;
            }
            Action::MeleeAttack { power_pct } | Action::RangedAttack { power_pct, .. } => {
                let attacker = self
                    .state
                    .actor(id)
                    .ok_or(StateError::ActorNotFound(id))?;
                let player = self.state.player()?;
                let result = self.resolver.resolve(
                    attacker,
                    player,
                    EffectiveStats::of(attacker, power_pct),
                );
                report.player_damage += result.damage;
                outcome = Some(result);
            }
            Action::Died { cause } => {
                if self.state.despawn(id).is_some() {
                    debug!(actor = %id, ?cause, "actor died");
                    report.removed.push(id);
                }
            }
            _ => {}
        }

        report.actions.push(ProcessedAction {
            actor: id,
            action,
            outcome,
        });
        Ok(())
    }

    fn spawn_pending(&mut self, pending: Vec<SpawnRequest>, now: Tick, report: &mut TickReport) {
        let sickness = self.config.ability_span(self.config.summon_sickness_ms);
        let player_cell = self.state.player().map(|player| player.position).ok();
        for request in pending {
            let open = self.map.is_passable(request.at)
                && !self.state.is_blocked(request.at)
                && Some(request.at) != player_cell;
            if !open {
                warn!(
                    summoner = %request.summoner,
                    at = %request.at,
                    "spawn dropped: cell taken"
                );
                continue;
            }
            let actor = match self.catalog.instantiate(
                request.enemy,
                request.at,
                request.level,
                &self.config,
            ) {
                Ok(actor) => actor,
                Err(err) => {
                    warn!(summoner = %request.summoner, %err, "spawn dropped");
                    continue;
                }
            };
            let clock = actor.clock.suspend_until(now + sickness);
            let id = self.state.spawn(actor.with_clock(clock));
            debug!(summoner = %request.summoner, actor = %id, at = %request.at, "spawned");
            report.spawned.push(id);
        }
        self.state.debug_check();
    }

    fn apply_player_damage(&mut self, report: &mut TickReport) -> Result<()> {
        if report.player_damage <= 0 {
            return Ok(());
        }
        let damage = report.player_damage;
        let depleted = self.state.update_actor(EntityId::PLAYER, |player| {
            player.combat.as_mut().is_some_and(|combat| {
                combat.health.current -= damage;
                combat.health.is_depleted()
            })
        })?;
        if depleted {
            info!(now = %report.now, "player died");
        }
        report.player_died = depleted;
        Ok(())
    }

    fn refresh_visibility(&mut self) {
        if self.visibility_source != VisibilitySource::Computed {
            return;
        }
        if let Ok(player) = self.state.player() {
            self.visibility = field_of_view(&self.map, player.position, self.config.sight_radius);
        }
    }
}
