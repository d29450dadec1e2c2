use strum::{Display, IntoStaticStr};

use super::EnvError;
use crate::state::Position;

/// Static terrain oracle produced by level generation.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Terrain at `position`, or `None` outside the map.
    fn tile(&self, position: Position) -> Option<TerrainKind>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// In bounds and walkable terrain. Occupancy is not considered.
    fn is_passable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(TerrainKind::is_passable)
    }

    /// Out-of-bounds cells block sight.
    fn blocks_sight(&self, position: Position) -> bool {
        self.tile(position).is_none_or(TerrainKind::blocks_sight)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn offset(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

/// Terrain classes, keyed by the level generator's tile codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainKind {
    Wall,
    Floor,
    Stairs,
    /// Closed door.
    Door,
    StairsUp,
    DoorOpen,
    Custom(u16),
}

impl TerrainKind {
    pub const fn from_code(code: u16) -> Self {
        match code {
            0 => Self::Wall,
            1 => Self::Floor,
            2 => Self::Stairs,
            3 => Self::Door,
            4 => Self::StairsUp,
            5 => Self::DoorOpen,
            other => Self::Custom(other),
        }
    }

    pub const fn code(self) -> u16 {
        match self {
            Self::Wall => 0,
            Self::Floor => 1,
            Self::Stairs => 2,
            Self::Door => 3,
            Self::StairsUp => 4,
            Self::DoorOpen => 5,
            Self::Custom(code) => code,
        }
    }

    pub const fn is_passable(self) -> bool {
        matches!(
            self,
            Self::Floor | Self::Stairs | Self::StairsUp | Self::DoorOpen
        )
    }

    pub const fn blocks_sight(self) -> bool {
        matches!(self, Self::Wall | Self::Door | Self::Custom(_))
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Dense row-major terrain grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
}

impl GridMap {
    /// A map of the given size filled with `fill`.
    pub fn filled(dimensions: MapDimensions, fill: TerrainKind) -> Self {
        Self {
            dimensions,
            tiles: vec![fill; dimensions.area()],
        }
    }

    /// Builds a map from row-major tile codes.
    pub fn from_codes(dimensions: MapDimensions, codes: &[u16]) -> Result<Self, EnvError> {
        if codes.len() != dimensions.area() {
            return Err(EnvError::MapSizeMismatch {
                expected: dimensions.area(),
                actual: codes.len(),
            });
        }
        Ok(Self {
            dimensions,
            tiles: codes.iter().copied().map(TerrainKind::from_code).collect(),
        })
    }

    /// Builds a map from rows of tile codes; all rows must share one width.
    pub fn from_rows<R: AsRef<[u16]>>(rows: &[R]) -> Result<Self, EnvError> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let dimensions = MapDimensions::new(width as u32, rows.len() as u32);
        let mut codes = Vec::with_capacity(dimensions.area());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(EnvError::RaggedRow {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
            codes.extend_from_slice(row);
        }
        Self::from_codes(dimensions, &codes)
    }

    /// Replaces the terrain of one cell, e.g. when a door opens.
    pub fn set_tile(&mut self, position: Position, terrain: TerrainKind) -> Result<(), EnvError> {
        let offset = self
            .dimensions
            .offset(position)
            .ok_or(EnvError::OutOfBounds(position))?;
        self.tiles[offset] = terrain;
        Ok(())
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<TerrainKind> {
        self.dimensions
            .offset(position)
            .map(|offset| self.tiles[offset])
    }
}

/// Cells currently in the player's field of view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityGrid {
    dimensions: MapDimensions,
    visible: Vec<bool>,
}

impl VisibilityGrid {
    /// Nothing visible.
    pub fn hidden(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            visible: vec![false; dimensions.area()],
        }
    }

    /// Everything visible.
    pub fn revealed(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            visible: vec![true; dimensions.area()],
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn set(&mut self, position: Position, visible: bool) {
        if let Some(offset) = self.dimensions.offset(position) {
            self.visible[offset] = visible;
        }
    }

    pub fn clear(&mut self) {
        self.visible.fill(false);
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.dimensions
            .offset(position)
            .is_some_and(|offset| self.visible[offset])
    }
}
