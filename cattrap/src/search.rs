use tracing::{debug, trace};

use crate::{evaluate, BlockedSet, Grid, Position};

/// The result of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// The minimax value of the position, in `[-100, 100]`.
    pub score: i32,
    /// The best move for the mover, or `None` if the position was terminal.
    pub mv: Option<Position>,
}

/// Picks the mover's best move from `mover`, assuming that the blocker
/// answers every move with its best block, looking `depth` plies ahead.
///
/// Shorthand for [`Search::new()`] followed by [`Search::best_move()`].
pub fn best_move(grid: &Grid, mover: Position, blocked: BlockedSet, depth: u32) -> SearchResult {
    Search::new(grid).best_move(mover, blocked, depth)
}

/// Depth-limited minimax over alternating plies.
///
/// On a mover ply, every free neighbor of the mover is tried. On a blocker
/// ply, every free cell except the mover's is tried as the next block. Each
/// blocker ply works on its own copy of the blocked set.
///
/// Ties are broken in favor of the candidate enumerated first, i.e. in
/// [`Grid::neighbors()`] order for the mover and row-major order for blocks.
/// The result does not depend on whether pruning is enabled.
#[derive(Clone, Debug)]
pub struct Search {
    grid: Grid,
    pruning: bool,
    nodes: u64,
}

impl Search {
    /// A search with alpha-beta pruning.
    pub fn new(grid: &Grid) -> Self {
        Self {
            grid: *grid,
            pruning: true,
            nodes: 0,
        }
    }

    /// A search that visits the whole tree.
    pub fn exhaustive(grid: &Grid) -> Self {
        Self {
            pruning: false,
            ..Self::new(grid)
        }
    }

    /// The number of nodes visited so far, over all searches.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn best_move(&mut self, mover: Position, blocked: BlockedSet, depth: u32) -> SearchResult {
        let nodes_before = self.nodes;
        let result = self.mover_ply(mover, blocked, depth, i32::MIN, i32::MAX);
        debug!(
            %mover,
            depth,
            score = result.score,
            mv = ?result.mv,
            nodes = self.nodes - nodes_before,
            pruning = self.pruning,
            "Search finished"
        );
        result
    }

    fn is_terminal(&self, mover: Position, blocked: BlockedSet, depth: u32) -> bool {
        depth == 0
            || self.grid.is_boundary(mover)
            || self.grid.neighbors(mover).all(|n| blocked.contains(n))
    }

    /// Maximizing ply.
    fn mover_ply(
        &mut self,
        mover: Position,
        blocked: BlockedSet,
        depth: u32,
        mut alpha: i32,
        beta: i32,
    ) -> SearchResult {
        self.nodes += 1;
        if self.is_terminal(mover, blocked, depth) {
            return SearchResult {
                score: evaluate(&self.grid, mover, blocked),
                mv: None,
            };
        }

        let mut best = SearchResult {
            score: i32::MIN,
            mv: None,
        };
        for next in self.grid.neighbors(mover) {
            if blocked.contains(next) {
                continue;
            }
            let score = self.blocker_ply(next, blocked, depth - 1, alpha, beta);
            if score > best.score {
                best = SearchResult {
                    score,
                    mv: Some(next),
                };
            }
            alpha = alpha.max(best.score);
            if self.pruning && beta <= alpha {
                trace!(%mover, depth, alpha, beta, "Cutoff on mover ply");
                break;
            }
        }
        best
    }

    /// Minimizing ply. Never produces a move.
    fn blocker_ply(
        &mut self,
        mover: Position,
        blocked: BlockedSet,
        depth: u32,
        alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        if self.is_terminal(mover, blocked, depth) {
            return evaluate(&self.grid, mover, blocked);
        }

        let mut best = i32::MAX;
        for cell in self.grid.cells() {
            if cell == mover || blocked.contains(cell) {
                continue;
            }
            let score = self
                .mover_ply(mover, blocked.insert(cell), depth - 1, alpha, beta)
                .score;
            best = best.min(score);
            beta = beta.min(best);
            if self.pruning && beta <= alpha {
                trace!(%mover, depth, alpha, beta, "Cutoff on blocker ply");
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::arbitrary::SmallBoard;
    use crate::{Adjacency, ESCAPE_SCORE, TRAPPED_SCORE};

    quickcheck! {
        fn pruning_does_not_change_the_result(board: SmallBoard, depth: u8) -> TestResult {
            let SmallBoard { grid, mover, blocked } = board;
            let depth = u32::from(depth % 4);
            let mut pruned = Search::new(&grid);
            let mut exhaustive = Search::exhaustive(&grid);
            let a = pruned.best_move(mover, blocked, depth);
            let b = exhaustive.best_move(mover, blocked, depth);
            TestResult::from_bool(a == b && pruned.nodes() <= exhaustive.nodes())
        }

        fn chosen_move_is_a_free_neighbor(board: SmallBoard) -> bool {
            let SmallBoard { grid, mover, blocked } = board;
            let result = best_move(&grid, mover, blocked, 2);
            match result.mv {
                Some(mv) => !blocked.contains(mv) && grid.neighbors(mover).any(|n| n == mv),
                None => {
                    grid.is_boundary(mover) || grid.neighbors(mover).all(|n| blocked.contains(n))
                }
            }
        }
    }

    #[test]
    fn surrounded_mover_has_no_move() {
        let grid = Grid::new(11, 11, Adjacency::Hex).unwrap();
        let mover = Position::new(5, 5);
        let blocked = BlockedSet::from_iter(grid.neighbors(mover));
        let result = best_move(&grid, mover, blocked, 3);
        assert_eq!(
            result,
            SearchResult {
                score: TRAPPED_SCORE,
                mv: None
            }
        );
    }

    #[test]
    fn steps_onto_the_boundary_when_possible() {
        let grid = Grid::new(5, 5, Adjacency::Orthogonal).unwrap();
        let mover = Position::new(1, 2);
        for depth in 1..=3 {
            let result = best_move(&grid, mover, BlockedSet::new(), depth);
            assert_eq!(result.mv, Some(Position::new(0, 2)));
            assert_eq!(result.score, ESCAPE_SCORE);
        }
    }

    #[test]
    fn zero_depth_only_evaluates() {
        let grid = Grid::new(9, 9, Adjacency::Hex).unwrap();
        let result = best_move(&grid, grid.center(), BlockedSet::new(), 0);
        assert_eq!(result.mv, None);
        assert_eq!(result.score, 96);
    }

    #[test]
    fn prefers_the_move_with_two_exits() {
        //   0 1 2 3 4
        // 0 # # . # #
        // 1 # # . # #
        // 2 # # C . .
        // 3 # # # . #
        // 4 # # # . #
        //
        // Up and right are both one step away from the boundary, but going up
        // leaves a single exit for the blocker to close.
        let grid = Grid::new(5, 5, Adjacency::Orthogonal).unwrap();
        let open = [(0, 2), (1, 2), (2, 2), (2, 3), (2, 4), (3, 3), (4, 3)];
        let blocked = BlockedSet::from_iter(
            grid.cells()
                .filter(|p| !open.contains(&(p.row, p.col))),
        );
        let mover = Position::new(2, 2);

        let result = best_move(&grid, mover, blocked, 3);
        assert_eq!(
            result,
            SearchResult {
                score: 99,
                mv: Some(Position::new(2, 3))
            }
        );
        assert_eq!(result, Search::exhaustive(&grid).best_move(mover, blocked, 3));

        // Following the shortest route would have gone up
        let route = crate::shortest_escape(&grid, mover, blocked).unwrap();
        assert_eq!(route.first_step, Position::new(1, 2));
    }
}
