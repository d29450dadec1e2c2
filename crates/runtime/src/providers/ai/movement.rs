//! Single-step movement policies.
//!
//! Every function returns a cell adjacent to the actor that passes
//! [`AiContext::is_open`], or `None`. Callers turn `None` into a weaker
//! action; nothing here fails.

use arrayvec::ArrayVec;
use game_core::Position;

use super::context::AiContext;
use super::pathfinder::PathFinder;

/// Steps toward `target`.
///
/// Within the pathfinding radius the bounded A* step is taken when open; if
/// it is occupied the open cardinal neighbour closest to the target is used
/// instead. Beyond the radius, or when A* finds nothing, the greedy axis
/// step applies.
pub fn move_toward(ctx: &AiContext<'_>, target: Position) -> Option<Position> {
    let radius = ctx.config().pathfinding_radius;
    if ctx.position().manhattan(target) <= radius
        && let Some(step) = PathFinder::new(ctx.env.map, radius).next_step(ctx.position(), target)
    {
        if ctx.is_open(step) {
            return Some(step);
        }
        if let Some(step) = flock_step(ctx, target) {
            return Some(step);
        }
    }
    greedy_step(ctx, target)
}

/// Open cardinal neighbour minimising the remaining Manhattan distance.
///
/// Ties keep the neighbour enumeration order (+x, -x, +y, -y).
pub fn flock_step(ctx: &AiContext<'_>, target: Position) -> Option<Position> {
    ctx.position()
        .cardinal_neighbors()
        .into_iter()
        .filter(|&cell| ctx.is_open(cell))
        .min_by_key(|cell| cell.manhattan(target))
}

/// Axis-priority step: the axis with the larger remaining delta first, the
/// vertical axis on ties.
pub fn greedy_step(ctx: &AiContext<'_>, target: Position) -> Option<Position> {
    let from = ctx.position();
    let (dx, dy) = from.direction_to(target);
    let horizontal = (dx != 0).then(|| from.offset(dx, 0));
    let vertical = (dy != 0).then(|| from.offset(0, dy));

    let order = if from.x.abs_diff(target.x) > from.y.abs_diff(target.y) {
        [horizontal, vertical]
    } else {
        [vertical, horizontal]
    };
    order.into_iter().flatten().find(|&cell| ctx.is_open(cell))
}

/// Steps directly away from `threat`: the horizontal retreat, then the
/// vertical one, then the diagonal.
pub fn move_away(ctx: &AiContext<'_>, threat: Position) -> Option<Position> {
    let from = ctx.position();
    let (dx, dy) = threat.direction_to(from);
    let candidates: ArrayVec<Position, 3> = [(dx, 0), (0, dy), (dx, dy)]
        .into_iter()
        .filter(|&delta| delta != (0, 0))
        .map(|(x, y)| from.offset(x, y))
        .collect();
    candidates.into_iter().find(|&cell| ctx.is_open(cell))
}

/// Perpendicular step relative to the line toward `anchor`, trying the two
/// sides in random order.
pub fn lateral_step(ctx: &mut AiContext<'_>, anchor: Position) -> Option<Position> {
    let from = ctx.position();
    let (dx, dy) = from.direction_to(anchor);
    if (dx, dy) == (0, 0) {
        return None;
    }
    let mut sides = [from.offset(-dy, dx), from.offset(dy, -dx)];
    ctx.rng.shuffle(&mut sides);
    sides.into_iter().find(|&cell| ctx.is_open(cell))
}

/// A random open cardinal neighbour.
pub fn random_step(ctx: &mut AiContext<'_>) -> Option<Position> {
    let mut open: ArrayVec<Position, 4> = ctx
        .position()
        .cardinal_neighbors()
        .into_iter()
        .filter(|&cell| ctx.is_open(cell))
        .collect();
    ctx.rng.shuffle(&mut open);
    open.first().copied()
}
