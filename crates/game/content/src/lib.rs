//! Data-driven content definitions and loaders.
//!
//! This crate turns data files into game-core values:
//! - Simulation configuration (TOML)
//! - Enemy catalog: behavior profile, stats, ranged and boss data per type (RON)
//! - Level layouts: tile-code rows plus initial placements (RON)
//!
//! Content is consumed by the runtime when a level is loaded and never
//! appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, LevelData, MapLoader, Placement,
};
