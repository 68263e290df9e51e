use cattrap::{Game, GameConfig, Outcome};
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::Blocker;

/// After this many ignored blocks in a row, the blocker is considered broken.
const MAX_IGNORED_BLOCKS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Escaped { turns: u32 },
    Trapped { turns: u32 },
    Resigned { turns: u32 },
}

/// Plays `game` until it is over or the blocker gives up.
///
/// Returns an error only when the blocker fails, not when it places an
/// invalid block.
pub fn play_game(game: &mut Game, blocker: &mut dyn Blocker) -> anyhow::Result<GameResult> {
    blocker.new_game(game)?;
    trace!("Starting position\n{}", game);

    let mut ignored_in_a_row = 0;
    loop {
        match game.outcome() {
            Outcome::Escaped => return Ok(GameResult::Escaped { turns: game.turns() }),
            Outcome::Trapped => return Ok(GameResult::Trapped { turns: game.turns() }),
            Outcome::InProgress => {}
        }

        let Some(block) = blocker.choose_block(game)? else {
            info!(blocker = blocker.name(), turns = game.turns(), "Blocker gave up");
            return Ok(GameResult::Resigned { turns: game.turns() });
        };

        match game.apply_block(block) {
            Ok(resolution) => {
                ignored_in_a_row = 0;
                debug!(%block, outcome = ?resolution.outcome, mover = ?resolution.mover);
                trace!("\n{}", game);
                blocker.turn_resolved(game, resolution)?;
            }
            Err(reason) => {
                info!(blocker = blocker.name(), %block, %reason, "Ignored block");
                ignored_in_a_row += 1;
                if ignored_in_a_row >= MAX_IGNORED_BLOCKS {
                    anyhow::bail!(
                        "Blocker '{}' placed {} invalid blocks in a row",
                        blocker.name(),
                        ignored_in_a_row
                    );
                }
                blocker.block_ignored(block, reason)?;
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchScore {
    pub escaped: usize,
    pub trapped: usize,
    pub resigned: usize,
}

/// Plays `num_games` games, each with freshly scattered random fences.
pub fn play_match(
    config: &GameConfig,
    blocker: &mut dyn Blocker,
    num_games: usize,
    rng: &mut StdRng,
) -> anyhow::Result<MatchScore> {
    let mut score = MatchScore::default();
    for game_idx in 0..num_games {
        let mut game = Game::with_random_fences(config, rng)?;
        match play_game(&mut game, blocker)? {
            GameResult::Escaped { turns } => {
                debug!(game_idx, turns, "Cat escaped");
                score.escaped += 1;
            }
            GameResult::Trapped { turns } => {
                debug!(game_idx, turns, "Cat trapped");
                score.trapped += 1;
            }
            GameResult::Resigned { turns } => {
                debug!(game_idx, turns, "Blocker gave up");
                score.resigned += 1;
            }
        }
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use cattrap::{Adjacency, FenceCount, IgnoredBlock, MoverStrategy, Position, TurnResolution};
    use rand::SeedableRng;

    use super::*;
    use crate::{GreedyBlocker, RandomBlocker};

    /// Plays a fixed list of blocks, then gives up.
    struct ScriptedBlocker {
        blocks: VecDeque<Position>,
        ignored: Vec<IgnoredBlock>,
        resolutions: Vec<TurnResolution>,
    }

    impl ScriptedBlocker {
        fn new(blocks: &[(i8, i8)]) -> Self {
            Self {
                blocks: blocks.iter().map(|&(r, c)| Position::new(r, c)).collect(),
                ignored: Vec::new(),
                resolutions: Vec::new(),
            }
        }
    }

    impl Blocker for ScriptedBlocker {
        fn name(&self) -> &str {
            "scripted"
        }

        fn choose_block(&mut self, _game: &Game) -> anyhow::Result<Option<Position>> {
            Ok(self.blocks.pop_front())
        }

        fn block_ignored(&mut self, _block: Position, reason: IgnoredBlock) -> anyhow::Result<()> {
            self.ignored.push(reason);
            Ok(())
        }

        fn turn_resolved(&mut self, _game: &Game, resolution: TurnResolution) -> anyhow::Result<()> {
            self.resolutions.push(resolution);
            Ok(())
        }
    }

    fn config() -> GameConfig {
        GameConfig {
            rows: 5,
            cols: 5,
            adjacency: Adjacency::Orthogonal,
            strategy: MoverStrategy::Pathfinder,
            random_fences: FenceCount { min: 0, max: 0 },
            ..GameConfig::default()
        }
    }

    #[test]
    fn scripted_game() {
        let mut game = Game::new(&config()).unwrap();
        // The cat starts at (2, 2) and runs up. Blocking its own cell is ignored.
        let mut blocker = ScriptedBlocker::new(&[(2, 2), (4, 4), (4, 3)]);
        let result = play_game(&mut game, &mut blocker).unwrap();

        assert_eq!(result, GameResult::Escaped { turns: 2 });
        assert_eq!(blocker.ignored, vec![IgnoredBlock::MoverCell(Position::new(2, 2))]);
        assert_eq!(
            blocker.resolutions,
            vec![
                TurnResolution {
                    outcome: Outcome::InProgress,
                    mover: Some(Position::new(1, 2))
                },
                TurnResolution {
                    outcome: Outcome::Escaped,
                    mover: Some(Position::new(0, 2))
                },
            ]
        );
    }

    #[test]
    fn blocker_gives_up() {
        let mut game = Game::new(&config()).unwrap();
        let mut blocker = ScriptedBlocker::new(&[]);
        let result = play_game(&mut game, &mut blocker).unwrap();
        assert_eq!(result, GameResult::Resigned { turns: 0 });
    }

    #[test]
    fn broken_blocker_is_an_error() {
        let mut game = Game::new(&config()).unwrap();
        let mut blocker = ScriptedBlocker::new(&[(9, 9); MAX_IGNORED_BLOCKS]);
        assert!(play_game(&mut game, &mut blocker).is_err());
    }

    #[test]
    fn greedy_matches_always_finish() {
        let config = GameConfig {
            rows: 11,
            cols: 11,
            adjacency: Adjacency::Hex,
            strategy: MoverStrategy::Pathfinder,
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut blocker = GreedyBlocker::new(StdRng::seed_from_u64(6));
        let score = play_match(&config, &mut blocker, 5, &mut rng).unwrap();
        assert_eq!(score.escaped + score.trapped, 5);
        assert_eq!(score.resigned, 0);
    }

    #[test]
    fn random_match_against_minimax() {
        let config = GameConfig {
            rows: 7,
            cols: 7,
            strategy: MoverStrategy::Minimax { depth: 2 },
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let mut blocker = RandomBlocker::new(StdRng::seed_from_u64(43));
        let score = play_match(&config, &mut blocker, 3, &mut rng).unwrap();
        assert_eq!(score.escaped + score.trapped, 3);
    }
}
