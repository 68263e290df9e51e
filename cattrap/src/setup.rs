use rand::seq::SliceRandom;
use rand::Rng;

use crate::{BlockedSet, Grid, Position};

/// Adds up to `count` randomly chosen fences to `blocked`, never on the mover.
///
/// If there are fewer than `count` free cells, all of them are blocked.
pub fn scatter_blocks<R: Rng + ?Sized>(
    grid: &Grid,
    mover: Position,
    blocked: BlockedSet,
    count: u32,
    rng: &mut R,
) -> BlockedSet {
    let mut free: Vec<Position> = grid
        .cells()
        .filter(|&p| p != mover && !blocked.contains(p))
        .collect();
    free.shuffle(rng);
    free.into_iter()
        .take(count as usize)
        .fold(blocked, |set, p| set.insert(p))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::Adjacency;

    #[test]
    fn never_blocks_the_mover() {
        let grid = Grid::new(9, 9, Adjacency::Hex).unwrap();
        let mover = grid.center();
        let existing = BlockedSet::new().insert(Position::new(0, 0));
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let blocked = scatter_blocks(&grid, mover, existing, 12, &mut rng);
            assert!(!blocked.contains(mover));
            assert!(existing.is_subset(blocked));
            assert_eq!(blocked.len(), 13);
        }
    }

    #[test]
    fn saturates_small_grids() {
        let grid = Grid::new(2, 2, Adjacency::Orthogonal).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let blocked = scatter_blocks(&grid, Position::new(0, 0), BlockedSet::new(), 100, &mut rng);
        assert_eq!(blocked.len(), 3);
        assert!(!blocked.contains(Position::new(0, 0)));
    }
}
