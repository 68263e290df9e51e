use crate::{shortest_escape, BlockedSet, Grid, Position};

/// The score of a mover sitting on a boundary cell.
pub const ESCAPE_SCORE: i32 = 100;

/// The score of a mover that cannot reach the boundary anymore.
pub const TRAPPED_SCORE: i32 = -100;

/// Scores a position from the point of view of the mover: `100 - distance`
/// to the closest reachable boundary cell, or [`TRAPPED_SCORE`] if there is
/// none.
///
/// Any reachable boundary scores strictly better than being trapped, no
/// matter how far away it is.
pub fn evaluate(grid: &Grid, position: Position, blocked: BlockedSet) -> i32 {
    match shortest_escape(grid, position, blocked) {
        Some(route) => (ESCAPE_SCORE - route.distance as i32).max(TRAPPED_SCORE + 1),
        None => TRAPPED_SCORE,
    }
}
