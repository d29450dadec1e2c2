//! Headless simulation driver.
//!
//! Loads a level from the content directory, runs the simulation for a fixed
//! number of ticks with a stationary player, and logs every applied action.
mod config;
mod logging;

use anyhow::{Context, Result};
use game_content::ContentFactory;
use game_core::Tick;
use runtime::{Event, LevelSetup, Runtime, Session, SessionEvent, TickReport, Topic};
use tracing::{debug, info, warn};

use crate::config::HeadlessConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = HeadlessConfig::from_env();
    let log_dir = config
        .log_dir
        .clone()
        .unwrap_or_else(logging::default_log_dir);
    let _guard = logging::setup_logging(&log_dir)?;

    run(config).await
}

async fn run(config: HeadlessConfig) -> Result<()> {
    let session = load_session(&config)?;
    let runtime = Runtime::builder().session(session).build()?;
    let handle = runtime.handle();

    let mut session_events = runtime.subscribe(Topic::Session);
    let watcher = tokio::spawn(async move {
        while let Ok(event) = session_events.recv().await {
            match event {
                Event::Session(SessionEvent::PlayerDied { at }) => warn!(%at, "player died"),
                other => debug!(?other, "session event"),
            }
        }
    });

    let mut totals = Totals::default();
    for step in 0..config.ticks {
        let now = Tick(step * config.tick_step);
        let report = handle.tick(now).await?;
        totals.record(&report);
        log_report(&report);
        if report.player_died {
            break;
        }
    }

    runtime.shutdown().await?;
    watcher.abort();

    info!(
        actions = totals.actions,
        attacks = totals.attacks,
        spawned = totals.spawned,
        removed = totals.removed,
        player_damage = totals.player_damage,
        "run finished"
    );
    Ok(())
}

fn load_session(config: &HeadlessConfig) -> Result<Session> {
    let factory = ContentFactory::new(&config.data_dir);
    let sim_config = factory.load_config()?;
    let catalog = factory.load_catalog()?;
    let level = factory
        .load_level(&config.map)
        .with_context(|| format!("loading map {}", config.map))?;
    let entities = level.spawn_entities(&catalog, &sim_config)?;

    info!(
        map = %config.map,
        seed = config.seed,
        actors = entities.len(),
        mode = ?sim_config.scheduler_mode,
        "level ready"
    );
    Ok(Session::new(
        LevelSetup::new(level.map, entities, config.seed),
        catalog,
        sim_config,
    ))
}

fn log_report(report: &TickReport) {
    for processed in &report.actions {
        debug!(
            now = %report.now,
            actor = %processed.actor,
            action = processed.action.name(),
            power = processed.action.power_pct(),
            damage = processed.outcome.map(|o| o.damage),
            "action"
        );
    }
    if report.player_damage > 0 {
        info!(now = %report.now, damage = report.player_damage, "player hit");
    }
    if !report.spawned.is_empty() {
        info!(now = %report.now, spawned = ?report.spawned, "summoned");
    }
}

#[derive(Debug, Default)]
struct Totals {
    actions: usize,
    attacks: usize,
    spawned: usize,
    removed: usize,
    player_damage: i64,
}

impl Totals {
    fn record(&mut self, report: &TickReport) {
        self.actions += report.actions.len();
        self.attacks += report
            .actions
            .iter()
            .filter(|processed| processed.action.is_attack())
            .count();
        self.spawned += report.spawned.len();
        self.removed += report.removed.len();
        self.player_damage += i64::from(report.player_damage);
    }
}
