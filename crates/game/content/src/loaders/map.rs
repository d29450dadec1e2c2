//! Level layout loader.
//!
//! A level file holds the terrain as rows of tile-code digits plus the initial
//! placements produced by level generation:
//!
//! ```text
//! (
//!     rows: ["00000", "01110", "01110", "00000"],
//!     player: (x: 1, y: 1),
//!     placements: [
//!         Enemy(enemy: 1, at: (x: 3, y: 2)),
//!         Prop(kind: chest, at: (x: 2, y: 2)),
//!     ],
//! )
//! ```

use std::path::Path;

use anyhow::{Context, bail};
use game_core::{
    ActorKind, ActorState, EnemyCatalog, EnemyTypeId, EntitiesState, GridMap, MapOracle,
    Position, SimConfig,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Initial occupant other than the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Enemy {
        enemy: EnemyTypeId,
        at: Position,
        #[serde(default = "default_level")]
        level: u32,
    },
    /// Chest, NPC, item or obstacle.
    Prop { kind: ActorKind, at: Position },
}

impl Placement {
    pub fn position(&self) -> Position {
        match self {
            Self::Enemy { at, .. } | Self::Prop { at, .. } => *at,
        }
    }
}

fn default_level() -> u32 {
    1
}

fn default_player_health() -> i32 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelRon {
    rows: Vec<String>,
    player: Position,
    #[serde(default = "default_player_health")]
    player_health: i32,
    #[serde(default)]
    placements: Vec<Placement>,
}

/// A parsed level: terrain plus where everything starts.
#[derive(Clone, Debug)]
pub struct LevelData {
    pub map: GridMap,
    pub player: Position,
    pub player_health: i32,
    pub placements: Vec<Placement>,
}

impl LevelData {
    /// Builds the canonical actor list in placement order, player first.
    pub fn spawn_entities(
        &self,
        catalog: &EnemyCatalog,
        config: &SimConfig,
    ) -> LoadResult<EntitiesState> {
        let mut entities =
            EntitiesState::with_player(ActorState::player(self.player, self.player_health));
        for placement in &self.placements {
            let actor = match placement {
                Placement::Enemy { enemy, at, level } => catalog
                    .instantiate(*enemy, *at, *level, config)
                    .with_context(|| format!("placement at {at}"))?,
                Placement::Prop { kind, at } => {
                    if matches!(kind, ActorKind::Player | ActorKind::Enemy) {
                        bail!("prop at {at} cannot be of kind {kind}");
                    }
                    ActorState::new(*kind, *at)
                }
            };
            entities.push(actor);
        }
        Ok(entities)
    }
}

/// Loader for level layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<LevelData> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<LevelData> {
        let data: LevelRon = ron::from_str(content).context("failed to parse map RON")?;

        let rows = data
            .rows
            .iter()
            .enumerate()
            .map(|(y, row)| parse_row(y, row))
            .collect::<LoadResult<Vec<_>>>()?;
        let map = GridMap::from_rows(&rows)?;

        if !map.is_passable(data.player) {
            bail!("player start {} is not walkable", data.player);
        }
        for placement in &data.placements {
            if !map.contains(placement.position()) {
                bail!("placement at {} is outside the map", placement.position());
            }
        }

        Ok(LevelData {
            map,
            player: data.player,
            player_health: data.player_health,
            placements: data.placements,
        })
    }
}

fn parse_row(y: usize, row: &str) -> LoadResult<Vec<u16>> {
    row.chars()
        .enumerate()
        .map(|(x, c)| {
            c.to_digit(10)
                .map(|d| d as u16)
                .with_context(|| format!("invalid tile code {c:?} at ({x}, {y})"))
        })
        .collect()
}
