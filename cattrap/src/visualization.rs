use std::fmt;

use crate::{Adjacency, Game, Position};

/// Draws the board as text, one line per row. `C` is the cat, `#` a fence.
///
/// On hex grids, odd rows are shifted by half a cell:
///
/// ```text
///     0 1 2 3 4
///  0  . . # . .
///  1   . . . . .
///  2  . # C . .
/// ```
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid();
        write!(f, "   ")?;
        for col in 0..grid.cols() {
            write!(f, "{:>2}", col)?;
        }
        for row in 0..grid.rows() {
            write!(f, "\n{:>2} ", row)?;
            if grid.adjacency() == Adjacency::Hex && row % 2 == 1 {
                write!(f, " ")?;
            }
            for col in 0..grid.cols() {
                let p = Position::new(row, col);
                let symbol = if p == self.mover() {
                    'C'
                } else if self.blocked().contains(p) {
                    '#'
                } else {
                    '.'
                };
                write!(f, " {}", symbol)?;
            }
        }
        Ok(())
    }
}
