use std::iter::FusedIterator;

use crate::{Position, MAX_DIMENSION};

const ROW_STRIDE: usize = MAX_DIMENSION as usize;
const NUM_WORDS: usize = ROW_STRIDE * ROW_STRIDE / 64;

/// A compact set of [`Position`]s on any grid up to
/// [`MAX_DIMENSION`] x [`MAX_DIMENSION`].
///
/// ```
/// use cattrap::{CellSet, Position};
/// let mut set = CellSet::new();
/// // This is an immutable data type, so functions like `insert` return a new `CellSet`.
/// set = set.insert(Position::new(2, 3));
/// set = set.insert(Position::new(2, 3)); // Inserting a second time has no effect
/// set = set.insert(Position::new(0, 7));
/// assert_eq!(Vec::from_iter(set), vec![Position::new(0, 7), Position::new(2, 3)]);
/// ```
///
/// # Note on immutability
///
/// Its "mutating" methods return a new value instead of mutating in place
/// (except for the `std::ops::BitXxxAssign` trait methods). It is [`Copy`]
/// and small, so taking a snapshot of a set is just a copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellSet {
    // Bit `row * ROW_STRIDE + col`, so iteration order is row-major.
    words: [u64; NUM_WORDS],
}

/// The cells the mover cannot enter.
pub type BlockedSet = CellSet;

fn bit(p: Position) -> Option<(usize, u64)> {
    let in_range = |x: i8| (0..MAX_DIMENSION).contains(&x);
    if !in_range(p.row) || !in_range(p.col) {
        return None;
    }
    let idx = p.row as usize * ROW_STRIDE + p.col as usize;
    Some((idx / 64, 1u64 << (idx % 64)))
}

impl CellSet {
    /// Creates a new, empty set.
    pub const fn new() -> Self {
        Self {
            words: [0; NUM_WORDS],
        }
    }

    pub fn len(self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    pub fn is_empty(self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn contains(self, p: Position) -> bool {
        bit(p).is_some_and(|(word, mask)| self.words[word] & mask != 0)
    }

    /// Positions outside of the representable range are ignored.
    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(mut self, p: Position) -> Self {
        debug_assert!(bit(p).is_some(), "{} is out of range", p);
        if let Some((word, mask)) = bit(p) {
            self.words[word] |= mask;
        }
        self
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn remove(mut self, p: Position) -> Self {
        if let Some((word, mask)) = bit(p) {
            self.words[word] &= !mask;
        }
        self
    }

    pub fn is_subset(self, other: CellSet) -> bool {
        self & other == self
    }
}

impl std::ops::BitAnd for CellSet {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self::Output {
        self &= rhs;
        self
    }
}

impl std::ops::BitOr for CellSet {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self::Output {
        self |= rhs;
        self
    }
}

impl std::ops::BitAndAssign for CellSet {
    fn bitand_assign(&mut self, rhs: Self) {
        for (word, other) in self.words.iter_mut().zip(rhs.words) {
            *word &= other;
        }
    }
}

impl std::ops::BitOrAssign for CellSet {
    fn bitor_assign(&mut self, rhs: Self) {
        for (word, other) in self.words.iter_mut().zip(rhs.words) {
            *word |= other;
        }
    }
}

impl FromIterator<Position> for CellSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        iter.into_iter().fold(Self::new(), |set, p| set.insert(p))
    }
}

impl IntoIterator for CellSet {
    type Item = Position;

    type IntoIter = CellSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CellSetIter {
            words: self.words,
            word_idx: 0,
        }
    }
}

/// Iterator for a [`CellSet`] that returns positions in row-major order.
#[derive(Clone, Copy, Debug)]
pub struct CellSetIter {
    words: [u64; NUM_WORDS],
    word_idx: usize,
}

impl Iterator for CellSetIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < NUM_WORDS {
            let word = &mut self.words[self.word_idx];
            if *word == 0 {
                self.word_idx += 1;
                continue;
            }
            let bit_idx = word.trailing_zeros() as usize;
            // Clear the flag corresponding to this position
            *word ^= 1u64 << bit_idx;
            let idx = self.word_idx * 64 + bit_idx;
            return Some(Position::new(
                (idx / ROW_STRIDE) as i8,
                (idx % ROW_STRIDE) as i8,
            ));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.len();
        (size, Some(size))
    }
}

impl ExactSizeIterator for CellSetIter {
    fn len(&self) -> usize {
        self.words[self.word_idx.min(NUM_WORDS)..]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }
}

impl FusedIterator for CellSetIter {}
