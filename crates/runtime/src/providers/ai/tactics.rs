//! Tactical position scoring.
//!
//! Scores are ephemeral: computed for a handful of candidate cells, used to
//! rank them, then dropped with the decision.

use game_core::{MapOracle, Position, TerrainKind};

/// Ranks cells by cover and by distance bands to known threats.
pub struct TacticalScorer<'a> {
    map: &'a dyn MapOracle,
}

impl<'a> TacticalScorer<'a> {
    pub const PARTIAL_COVER: i32 = 20;
    pub const BOXED_IN: i32 = -30;
    pub const POINT_BLANK: i32 = -50;
    pub const CLOSE: i32 = -10;
    pub const MEDIUM: i32 = 10;

    pub fn new(map: &'a dyn MapOracle) -> Self {
        Self { map }
    }

    /// Cover from adjacent walls plus one distance band per threat.
    ///
    /// | walls beside the cell | score |  | distance to a threat | score |
    /// |---|---|---|---|---|
    /// | 0 | 0 |  | <= 1 | -50 |
    /// | 1-2 | +20 |  | 2-3 | -10 |
    /// | 3-4 | -30 |  | 4-6 | +10 |
    /// |   |   |  | > 6 | 0 |
    pub fn score(&self, cell: Position, threats: &[Position]) -> i32 {
        self.cover(cell) + threats.iter().map(|&threat| Self::band(cell, threat)).sum::<i32>()
    }

    fn cover(&self, cell: Position) -> i32 {
        let walls = cell
            .cardinal_neighbors()
            .into_iter()
            .filter(|&n| self.map.tile(n).is_some_and(TerrainKind::is_wall))
            .count();
        match walls {
            0 => 0,
            1 | 2 => Self::PARTIAL_COVER,
            _ => Self::BOXED_IN,
        }
    }

    fn band(cell: Position, threat: Position) -> i32 {
        match cell.manhattan(threat) {
            0..=1 => Self::POINT_BLANK,
            2..=3 => Self::CLOSE,
            4..=6 => Self::MEDIUM,
            _ => 0,
        }
    }
}

/// Whether direction `candidate` points away from direction `ally`.
///
/// A strictly negative dot product; perpendicular and diagonal ties are not
/// opposition.
#[inline]
pub fn opposes(candidate: (i32, i32), ally: (i32, i32)) -> bool {
    candidate.0 * ally.0 + candidate.1 * ally.1 < 0
}
