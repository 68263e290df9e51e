use crate::{Position, MAX_DIMENSION};

/// The error type for [`Grid::new()`](crate::Grid::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidGrid {
    pub rows: i8,
    pub cols: i8,
}

impl std::error::Error for InvalidGrid {}

impl std::fmt::Display for InvalidGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A {}x{} grid is not supported, both dimensions must be between 1 and {}",
            self.rows, self.cols, MAX_DIMENSION
        )
    }
}

/// The error type for building a [`Game`](crate::Game) from a [`GameConfig`](crate::GameConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidConfig {
    Grid(InvalidGrid),
    StartOutOfBounds(Position),
    FenceOutOfBounds(Position),
    FenceOnStart(Position),
    ZeroDepth,
    EmptyFenceRange { min: u32, max: u32 },
}

impl std::error::Error for InvalidConfig {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidConfig::Grid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidGrid> for InvalidConfig {
    fn from(err: InvalidGrid) -> Self {
        InvalidConfig::Grid(err)
    }
}

impl std::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfig::Grid(_) => write!(f, "Invalid grid dimensions"),
            InvalidConfig::StartOutOfBounds(p) => {
                write!(f, "The starting cell {} is outside of the grid", p)
            }
            InvalidConfig::FenceOutOfBounds(p) => {
                write!(f, "The fence at {} is outside of the grid", p)
            }
            InvalidConfig::FenceOnStart(p) => {
                write!(f, "A fence was placed on the starting cell {}", p)
            }
            InvalidConfig::ZeroDepth => write!(f, "The search depth must be at least 1"),
            InvalidConfig::EmptyFenceRange { min, max } => write!(
                f,
                "The random fence range {}..={} is empty",
                min, max
            ),
        }
    }
}

/// The reason why [`Game::apply_block()`](crate::Game::apply_block) ignored a block.
///
/// None of these change the state of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredBlock {
    GameOver,
    OutOfBounds(Position),
    MoverCell(Position),
    AlreadyBlocked(Position),
}

impl std::error::Error for IgnoredBlock {}

impl std::fmt::Display for IgnoredBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoredBlock::GameOver => write!(f, "The game is over, no more blocks are accepted"),
            IgnoredBlock::OutOfBounds(p) => write!(f, "The cell {} is outside of the grid", p),
            IgnoredBlock::MoverCell(p) => write!(f, "The cat is sitting on {}", p),
            IgnoredBlock::AlreadyBlocked(p) => write!(f, "The cell {} is already blocked", p),
        }
    }
}
