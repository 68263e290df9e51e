use rand::Rng;
use tracing::debug;

use crate::{
    scatter_blocks, shortest_escape, BlockedSet, GameConfig, Grid, IgnoredBlock, InvalidConfig,
    MoverStrategy, Position, TrapRule,
};

/// Where a game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Waiting for the next block.
    InProgress,
    /// The mover reached the boundary.
    Escaped,
    /// The mover cannot escape anymore, see [`TrapRule`].
    Trapped,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Summarizes what happened after a block was placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnResolution {
    pub outcome: Outcome,
    /// The mover's new cell, or `None` if it could not move.
    pub mover: Option<Position>,
}

/// A single game: the board, the mover, and whose turn it is.
///
/// The blocker drives the game by calling [`Game::apply_block()`], which
/// answers with the mover's move. Blocks are never undone, except by
/// resetting the game.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    start: Position,
    initial_blocks: BlockedSet,
    blocked: BlockedSet,
    mover: Position,
    strategy: MoverStrategy,
    trap_rule: TrapRule,
    outcome: Outcome,
    turns: u32,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, InvalidConfig> {
        let grid = config.validate()?;
        let mut game = Self {
            grid,
            start: config.start_on(&grid),
            initial_blocks: BlockedSet::from_iter(config.fences.iter().copied()),
            blocked: BlockedSet::new(),
            mover: config.start_on(&grid),
            strategy: config.strategy,
            trap_rule: config.trap_rule,
            outcome: Outcome::InProgress,
            turns: 0,
        };
        game.reset();
        Ok(game)
    }

    /// Like [`Game::new()`], plus a random number of extra fences drawn from
    /// [`GameConfig::random_fences`].
    pub fn with_random_fences<R: Rng + ?Sized>(
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self, InvalidConfig> {
        let mut game = Self::new(config)?;
        let count = rng.gen_range(config.random_fences.min..=config.random_fences.max);
        let blocks = scatter_blocks(&game.grid, game.start, game.initial_blocks, count, rng);
        game.reset_with(blocks);
        Ok(game)
    }

    /// Puts the mover back on its starting cell and restores the initial fences.
    pub fn reset(&mut self) {
        self.blocked = self.initial_blocks;
        self.mover = self.start;
        self.turns = 0;
        self.outcome = self.classify();
    }

    /// Like [`Game::reset()`], but with a different set of initial fences.
    ///
    /// A fence on the starting cell is dropped.
    pub fn reset_with(&mut self, blocks: BlockedSet) {
        self.initial_blocks = blocks.remove(self.start);
        self.reset();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mover(&self) -> Position {
        self.mover
    }

    pub fn blocked(&self) -> BlockedSet {
        self.blocked
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The number of blocks accepted since the last reset.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Whether a block could be placed on `p`.
    pub fn is_free(&self, p: Position) -> bool {
        self.check_block(p).is_ok()
    }

    /// All cells a block could be placed on, in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.grid.cells().filter(|&p| self.is_free(p))
    }

    pub fn check_block(&self, p: Position) -> Result<(), IgnoredBlock> {
        if self.outcome.is_over() {
            Err(IgnoredBlock::GameOver)
        } else if !self.grid.contains(p) {
            Err(IgnoredBlock::OutOfBounds(p))
        } else if p == self.mover {
            Err(IgnoredBlock::MoverCell(p))
        } else if self.blocked.contains(p) {
            Err(IgnoredBlock::AlreadyBlocked(p))
        } else {
            Ok(())
        }
    }

    /// Blocks `p` and lets the mover answer.
    ///
    /// An invalid block is returned as an error and leaves the game untouched.
    pub fn apply_block(&mut self, p: Position) -> Result<TurnResolution, IgnoredBlock> {
        self.check_block(p)?;
        self.blocked = self.blocked.insert(p);
        self.turns += 1;

        let reply = self.strategy.reply(&self.grid, self.mover, self.blocked);
        match reply {
            Some(next) => {
                self.mover = next;
                self.outcome = self.classify();
            }
            None => self.outcome = Outcome::Trapped,
        }
        debug!(
            block = %p,
            mover = %self.mover,
            outcome = ?self.outcome,
            turn = self.turns,
            "Turn resolved"
        );
        Ok(TurnResolution {
            outcome: self.outcome,
            mover: reply,
        })
    }

    fn classify(&self) -> Outcome {
        let grid = &self.grid;
        if grid.is_boundary(self.mover) {
            Outcome::Escaped
        } else if grid.neighbors(self.mover).all(|n| self.blocked.contains(n)) {
            Outcome::Trapped
        } else if self.trap_rule == TrapRule::Enclosed
            && shortest_escape(grid, self.mover, self.blocked).is_none()
        {
            Outcome::Trapped
        } else {
            Outcome::InProgress
        }
    }
}
