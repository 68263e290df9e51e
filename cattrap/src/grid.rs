use std::fmt;

use serde::{Deserialize, Serialize};

use crate::InvalidGrid;

/// The largest number of rows or columns a [`Grid`] can have.
pub const MAX_DIMENSION: i8 = 16;

/// A cell on the grid, addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    fn offset(self, (d_row, d_col): (i8, i8)) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Which cells count as neighbors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjacency {
    /// Six neighbors. Odd rows are drawn shifted right by half a cell, so the
    /// diagonal offsets depend on the parity of the row.
    #[default]
    Hex,
    /// The four cardinal neighbors.
    Orthogonal,
}

const HEX_EVEN_ROW: [(i8, i8); 6] = [(-1, 0), (-1, -1), (0, -1), (0, 1), (1, 0), (1, -1)];
const HEX_ODD_ROW: [(i8, i8); 6] = [(-1, 1), (-1, 0), (0, -1), (0, 1), (1, 1), (1, 0)];
const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

impl Adjacency {
    fn offsets(self, row: i8) -> &'static [(i8, i8)] {
        match self {
            Adjacency::Hex if row % 2 == 0 => &HEX_EVEN_ROW,
            Adjacency::Hex => &HEX_ODD_ROW,
            Adjacency::Orthogonal => &ORTHOGONAL,
        }
    }
}

/// The fixed playing area.
///
/// Knows its dimensions and which cells are adjacent, nothing else. It is
/// [`Copy`], so it is passed around by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: i8,
    cols: i8,
    adjacency: Adjacency,
}

impl Grid {
    pub fn new(rows: i8, cols: i8, adjacency: Adjacency) -> Result<Self, InvalidGrid> {
        let valid = 1..=MAX_DIMENSION;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(InvalidGrid { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            adjacency,
        })
    }

    pub fn rows(self) -> i8 {
        self.rows
    }

    pub fn cols(self) -> i8 {
        self.cols
    }

    pub fn adjacency(self) -> Adjacency {
        self.adjacency
    }

    pub fn num_cells(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn contains(self, p: Position) -> bool {
        (0..self.rows).contains(&p.row) && (0..self.cols).contains(&p.col)
    }

    /// Whether `p` lies on the outer ring. Reaching such a cell means escaping.
    pub fn is_boundary(self, p: Position) -> bool {
        p.row == 0 || p.col == 0 || p.row == self.rows - 1 || p.col == self.cols - 1
    }

    pub fn center(self) -> Position {
        Position::new(self.rows / 2, self.cols / 2)
    }

    /// The in-bounds neighbors of `p`, always in the same order.
    pub fn neighbors(self, p: Position) -> Neighbors {
        Neighbors {
            grid: self,
            center: p,
            offsets: self.adjacency.offsets(p.row),
        }
    }

    /// All cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// Row-major index of an in-bounds position.
    pub(crate) fn index(self, p: Position) -> usize {
        debug_assert!(self.contains(p));
        p.row as usize * self.cols as usize + p.col as usize
    }
}

/// Iterator produced by [`Grid::neighbors()`].
#[derive(Clone, Debug)]
pub struct Neighbors {
    grid: Grid,
    center: Position,
    offsets: &'static [(i8, i8)],
}

impl Iterator for Neighbors {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((&delta, rest)) = self.offsets.split_first() {
            self.offsets = rest;
            match self.center.offset(delta) {
                Some(p) if self.grid.contains(p) => return Some(p),
                _ => {}
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len()))
    }
}
