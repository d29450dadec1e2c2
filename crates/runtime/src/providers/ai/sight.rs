//! Terrain raycasts.

use game_core::{MapOracle, Position, VisibilityGrid};

/// Bresenham line of sight between two cells.
///
/// Only the cells strictly between the endpoints are tested, against
/// [`MapOracle::blocks_sight`] (walls and closed doors).
pub fn has_line_of_sight(map: &dyn MapOracle, from: Position, to: Position) -> bool {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cursor = from;

    loop {
        if cursor == to {
            return true;
        }
        if cursor != from && map.blocks_sight(cursor) {
            return false;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cursor.x += sx;
        }
        if e2 <= dx {
            err += dx;
            cursor.y += sy;
        }
    }
}

/// Cells visible from `origin` within a circular `radius`.
///
/// Walls that stop a ray are themselves visible.
pub fn field_of_view(map: &dyn MapOracle, origin: Position, radius: u32) -> VisibilityGrid {
    let dimensions = map.dimensions();
    let mut grid = VisibilityGrid::hidden(dimensions);
    // No cell of the map lies farther than width + height.
    let reach = radius.min(dimensions.width.saturating_add(dimensions.height));
    let r = i32::try_from(reach).unwrap_or(i32::MAX);
    let r_sq = i64::from(r) * i64::from(r);
    for dy in -r..=r {
        for dx in -r..=r {
            if i64::from(dx).pow(2) + i64::from(dy).pow(2) > r_sq {
                continue;
            }
            let cell = origin.offset(dx, dy);
            if map.contains(cell) && has_line_of_sight(map, origin, cell) {
                grid.set(cell, true);
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::GridMap;

    fn corridor() -> GridMap {
        GridMap::from_rows(&[
            [0, 0, 0, 0, 0, 0, 0],
            [0, 1, 1, 1, 1, 1, 0],
            [0, 1, 1, 0, 1, 1, 0],
            [0, 1, 1, 3, 1, 1, 0],
            [0, 0, 0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn open_row_is_clear() {
        let map = corridor();
        assert!(has_line_of_sight(&map, Position::new(1, 1), Position::new(5, 1)));
        assert!(has_line_of_sight(&map, Position::new(5, 1), Position::new(1, 1)));
    }

    #[test]
    fn walls_and_closed_doors_block() {
        let map = corridor();
        assert!(!has_line_of_sight(&map, Position::new(1, 2), Position::new(5, 2)));
        assert!(!has_line_of_sight(&map, Position::new(1, 3), Position::new(5, 3)));
    }

    #[test]
    fn endpoints_never_block() {
        let map = corridor();
        assert!(has_line_of_sight(&map, Position::new(2, 2), Position::new(3, 2)));
        assert!(has_line_of_sight(&map, Position::new(3, 2), Position::new(3, 2)));
    }

    #[test]
    fn fov_stops_at_walls() {
        let map = corridor();
        let grid = field_of_view(&map, Position::new(1, 2), 8);
        assert!(grid.is_visible(Position::new(1, 2)));
        assert!(grid.is_visible(Position::new(3, 2)));
        assert!(!grid.is_visible(Position::new(5, 2)));
        assert!(grid.is_visible(Position::new(5, 1)));
    }

    #[test]
    fn oversized_radius_covers_the_map() {
        let map = corridor();
        let origin = Position::new(2, 1);
        let grid = field_of_view(&map, origin, u32::MAX);
        assert!(grid.is_visible(origin));
        assert!(grid.is_visible(Position::new(5, 1)));
        assert_eq!(grid, field_of_view(&map, origin, 12));
    }
}
