use serde::{Deserialize, Serialize};

use crate::{best_move, shortest_escape, Adjacency, BlockedSet, Grid, InvalidConfig, Position};

/// How the mover picks its reply to a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MoverStrategy {
    /// Take the first step of the shortest escape route.
    Pathfinder,
    /// Search `depth` plies ahead, see [`best_move()`].
    Minimax { depth: u32 },
}

impl Default for MoverStrategy {
    fn default() -> Self {
        MoverStrategy::Minimax { depth: 3 }
    }
}

impl MoverStrategy {
    /// The mover's next cell, or `None` if it has nowhere to go.
    pub fn reply(self, grid: &Grid, mover: Position, blocked: BlockedSet) -> Option<Position> {
        match self {
            MoverStrategy::Pathfinder => shortest_escape(grid, mover, blocked)
                .map(|route| route.first_step)
                .filter(|&step| step != mover),
            MoverStrategy::Minimax { depth } => best_move(grid, mover, blocked, depth).mv,
        }
    }
}

/// When the mover counts as trapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapRule {
    /// Only when it cannot make a single move.
    #[default]
    NoMoves,
    /// As soon as no boundary cell is reachable anymore.
    Enclosed,
}

/// Inclusive range for the number of random fences placed before a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FenceCount {
    pub min: u32,
    pub max: u32,
}

impl Default for FenceCount {
    fn default() -> Self {
        Self { min: 9, max: 15 }
    }
}

/// Everything needed to set up a [`Game`](crate::Game).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: i8,
    pub cols: i8,
    pub adjacency: Adjacency,
    /// Where the mover starts. The center of the grid if omitted.
    pub start: Option<Position>,
    pub strategy: MoverStrategy,
    pub trap_rule: TrapRule,
    /// Cells that are blocked at the start of every game.
    pub fences: Vec<Position>,
    /// Used by [`Game::with_random_fences()`](crate::Game::with_random_fences).
    pub random_fences: FenceCount,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            adjacency: Adjacency::Hex,
            start: None,
            strategy: MoverStrategy::default(),
            trap_rule: TrapRule::default(),
            fences: Vec::new(),
            random_fences: FenceCount::default(),
        }
    }
}

impl GameConfig {
    /// Checks the config and returns the grid it describes.
    pub fn validate(&self) -> Result<Grid, InvalidConfig> {
        let grid = Grid::new(self.rows, self.cols, self.adjacency)?;
        let start = self.start_on(&grid);
        if !grid.contains(start) {
            return Err(InvalidConfig::StartOutOfBounds(start));
        }
        for &fence in &self.fences {
            if !grid.contains(fence) {
                return Err(InvalidConfig::FenceOutOfBounds(fence));
            }
            if fence == start {
                return Err(InvalidConfig::FenceOnStart(fence));
            }
        }
        if self.strategy == (MoverStrategy::Minimax { depth: 0 }) {
            return Err(InvalidConfig::ZeroDepth);
        }
        let FenceCount { min, max } = self.random_fences;
        if min > max {
            return Err(InvalidConfig::EmptyFenceRange { min, max });
        }
        Ok(grid)
    }

    pub(crate) fn start_on(&self, grid: &Grid) -> Position {
        self.start.unwrap_or_else(|| grid.center())
    }
}
