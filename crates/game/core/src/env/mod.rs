//! Read-only world data consulted by decisions.
//!
//! Terrain, the player's field of view, the enemy catalog and configuration
//! are bundled in [`Env`] so decision code receives one borrow instead of four.
mod catalog;
mod error;
mod map;
mod rng;

pub use catalog::{BehaviorProfile, BossSpec, EnemyCatalog, EnemyEntry, EnemyTypeId, RangedProfile};
pub use error::EnvError;
pub use map::{GridMap, MapDimensions, MapOracle, TerrainKind, VisibilityGrid};
pub use rng::{DecisionRng, compute_seed};

use crate::config::SimConfig;
use crate::state::Position;

#[derive(Clone, Copy)]
pub struct Env<'a> {
    pub map: &'a dyn MapOracle,
    pub visibility: &'a VisibilityGrid,
    pub catalog: &'a EnemyCatalog,
    pub config: &'a SimConfig,
}

impl<'a> Env<'a> {
    pub fn new(
        map: &'a dyn MapOracle,
        visibility: &'a VisibilityGrid,
        catalog: &'a EnemyCatalog,
        config: &'a SimConfig,
    ) -> Self {
        Self {
            map,
            visibility,
            catalog,
            config,
        }
    }

    pub fn is_passable(&self, position: Position) -> bool {
        self.map.is_passable(position)
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.visibility.is_visible(position)
    }
}
