use quickcheck::Arbitrary;

use crate::{Adjacency, BlockedSet, Grid, Position};

/// A random board of at most 5x5 cells, small enough to search exhaustively.
#[derive(Clone, Copy, Debug)]
pub struct SmallBoard {
    pub grid: Grid,
    pub mover: Position,
    // Never contains the mover
    pub blocked: BlockedSet,
}

impl Arbitrary for SmallBoard {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let adjacency = *g.choose(&[Adjacency::Hex, Adjacency::Orthogonal]).unwrap();
        let rows = (u8::arbitrary(g) % 3 + 3) as i8;
        let cols = (u8::arbitrary(g) % 3 + 3) as i8;
        let grid = Grid::new(rows, cols, adjacency).unwrap();

        let mover = Position::new(
            (u8::arbitrary(g) % rows as u8) as i8,
            (u8::arbitrary(g) % cols as u8) as i8,
        );
        // Block roughly a third of the cells
        let blocked = grid
            .cells()
            .filter(|&p| p != mover && u8::arbitrary(g) % 3 == 0)
            .collect();

        SmallBoard {
            grid,
            mover,
            blocked,
        }
    }
}
