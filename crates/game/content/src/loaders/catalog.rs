//! Enemy catalog loader.

use std::path::Path;

use anyhow::Context;
use game_core::{EnemyCatalog, EnemyEntry};

use crate::loaders::{LoadResult, read_file};

/// Loader for the enemy-type table from a RON list of entries.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> LoadResult<EnemyCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<EnemyCatalog> {
        let entries: Vec<EnemyEntry> =
            ron::from_str(content).context("failed to parse enemy catalog RON")?;
        Ok(EnemyCatalog::new(entries)?)
    }
}
