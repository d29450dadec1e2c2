//! Bounded grid A*.
//!
//! The search runs over terrain only; occupancy is checked by the caller on
//! the returned step. Expansion is confined to a square window around the
//! start, which caps the work per call at `(2r + 1)^2` nodes.

use game_core::{MapOracle, Position};
use pathfinding::prelude::astar;

/// Four-neighbour A* with a Manhattan heuristic and a bounded search window.
pub struct PathFinder<'a> {
    map: &'a dyn MapOracle,
    radius: u32,
}

impl<'a> PathFinder<'a> {
    pub fn new(map: &'a dyn MapOracle, radius: u32) -> Self {
        Self { map, radius }
    }

    /// Full cardinal path from `from` to `to`, both ends included.
    ///
    /// `None` when the target lies outside the radius or no route exists
    /// inside the window. The target cell itself is always enterable, so the
    /// player's cell can be a goal.
    pub fn find_path(&self, from: Position, to: Position) -> Option<Vec<Position>> {
        if from.manhattan(to) > self.radius {
            return None;
        }
        let (path, _cost) = astar(
            &from,
            |&cell| {
                cell.cardinal_neighbors()
                    .into_iter()
                    .filter(move |&next| next == to || self.is_searchable(from, next))
                    .map(|next| (next, 1u32))
            },
            |&cell| cell.manhattan(to),
            |&cell| cell == to,
        )?;
        Some(path)
    }

    /// First step along the shortest path, or `None` when already there or
    /// unreachable.
    pub fn next_step(&self, from: Position, to: Position) -> Option<Position> {
        if from == to {
            return None;
        }
        self.find_path(from, to)?.get(1).copied()
    }

    fn is_searchable(&self, origin: Position, cell: Position) -> bool {
        origin.chebyshev(cell) <= self.radius && self.map.is_passable(cell)
    }
}
