use std::collections::VecDeque;

use crate::{BlockedSet, CellSet, Grid, Position};

/// The result of [`shortest_escape()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapeRoute {
    /// The boundary cell that is reached.
    pub target: Position,
    /// Number of moves needed to reach `target`.
    pub distance: u32,
    /// The first move towards `target`.
    ///
    /// When the start is already on the boundary, this is the start itself.
    pub first_step: Position,
}

/// Finds the closest boundary cell reachable from `start` without entering a
/// blocked cell.
///
/// Among several closest boundary cells, the one that the breadth-first search
/// dequeues first (following [`Grid::neighbors()`] order) wins. Returns `None`
/// if `start` is walled off.
pub fn shortest_escape(grid: &Grid, start: Position, blocked: BlockedSet) -> Option<EscapeRoute> {
    let (target, parents) = breadth_first(grid, start, blocked)?;
    let mut distance = 0;
    let mut first_step = start;
    for p in walk_back(grid, start, target, &parents) {
        distance += 1;
        first_step = p;
    }
    Some(EscapeRoute {
        target,
        distance,
        first_step,
    })
}

/// Like [`shortest_escape()`], but returns the whole path, excluding `start`
/// and including the boundary cell.
pub fn escape_path(grid: &Grid, start: Position, blocked: BlockedSet) -> Option<Vec<Position>> {
    let (target, parents) = breadth_first(grid, start, blocked)?;
    let mut path: Vec<Position> = walk_back(grid, start, target, &parents).collect();
    path.reverse();
    Some(path)
}

/// Returns the boundary cell that was reached, and the parent of every
/// visited cell, indexed by [`Grid::index()`].
fn breadth_first(
    grid: &Grid,
    start: Position,
    blocked: BlockedSet,
) -> Option<(Position, Vec<Option<Position>>)> {
    let mut parents = vec![None; grid.num_cells()];
    let mut visited = CellSet::new().insert(start);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if grid.is_boundary(current) {
            return Some((current, parents));
        }
        for next in grid.neighbors(current) {
            if blocked.contains(next) || visited.contains(next) {
                continue;
            }
            visited = visited.insert(next);
            parents[grid.index(next)] = Some(current);
            queue.push_back(next);
        }
    }
    None
}

/// Goes from `target` back towards `start`, yielding every cell except `start`.
fn walk_back<'a>(
    grid: &'a Grid,
    start: Position,
    target: Position,
    parents: &'a [Option<Position>],
) -> impl Iterator<Item = Position> + 'a {
    std::iter::successors(Some(target), move |&p| parents[grid.index(p)])
        .take_while(move |&p| p != start)
}
