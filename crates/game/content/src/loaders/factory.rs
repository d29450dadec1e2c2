//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use game_core::{EnemyCatalog, SimConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LevelData, LoadResult, MapLoader};

/// Content factory that loads all simulation content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── enemies.ron
/// └── maps/
///     └── arena.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load simulation configuration from `config.toml`.
    ///
    /// A missing file yields the defaults.
    pub fn load_config(&self) -> LoadResult<SimConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(SimConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the enemy catalog from `enemies.ron`.
    pub fn load_catalog(&self) -> LoadResult<EnemyCatalog> {
        CatalogLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load a level from `maps/{map_name}.ron`.
    pub fn load_level(&self, map_name: &str) -> LoadResult<LevelData> {
        let path = self.data_dir.join("maps").join(format!("{map_name}.ron"));
        MapLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
