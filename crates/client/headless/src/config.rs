//! Headless driver configuration.
use std::env;
use std::path::PathBuf;

/// Settings for one unattended simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessConfig {
    /// Directory holding `config.toml`, `enemies.ron` and `maps/`.
    pub data_dir: PathBuf,
    pub map: String,
    pub seed: u64,
    /// Number of ticks to drive.
    pub ticks: u64,
    /// Clock advance per tick; milliseconds in continuous mode.
    pub tick_step: u64,
    /// Log directory override; the platform cache dir otherwise.
    pub log_dir: Option<PathBuf>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../game/content/data")),
            map: "arena".to_owned(),
            seed: 0,
            ticks: 600,
            tick_step: 50,
            log_dir: None,
        }
    }
}

impl HeadlessConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_DATA_DIR` - content directory (default: bundled data)
    /// - `DUNGEON_MAP` - map name under `maps/` (default: arena)
    /// - `DUNGEON_SEED` - game seed (default: 0)
    /// - `DUNGEON_TICKS` - ticks to run (default: 600)
    /// - `DUNGEON_TICK_MS` - clock advance per tick (default: 50)
    /// - `DUNGEON_LOG_DIR` - log directory (default: platform-specific)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("DUNGEON_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(map) = lookup("DUNGEON_MAP") {
            config.map = map;
        }
        if let Some(seed) = parse(&lookup, "DUNGEON_SEED") {
            config.seed = seed;
        }
        if let Some(ticks) = parse(&lookup, "DUNGEON_TICKS") {
            config.ticks = ticks;
        }
        if let Some(step) = parse::<u64>(&lookup, "DUNGEON_TICK_MS") {
            config.tick_step = step.max(1);
        }
        config.log_dir = lookup("DUNGEON_LOG_DIR").map(PathBuf::from);

        config
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}
