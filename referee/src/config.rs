use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use cattrap::GameConfig;
use serde::{Deserialize, Serialize};

use crate::BlockerKind;

/// Settings for a series of games, as read from a JSON file.
///
/// Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefereeConfig {
    pub game: GameConfig,
    pub blocker: BlockerKind,
    /// How many games to play. Zero is treated as one.
    pub num_games: usize,
}

impl RefereeConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file '{}'", path.display()))?;
        let config: RefereeConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file '{}'", path.display()))?;
        config.game.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use cattrap::{Adjacency, MoverStrategy};

    use super::*;

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("referee_config_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "game": { "rows": 11, "cols": 11, "strategy": { "type": "pathfinder" } }, "blocker": "greedy", "num_games": 5 }"#,
        )
        .unwrap();
        let config = RefereeConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.blocker, BlockerKind::Greedy);
        assert_eq!(config.num_games, 5);
        assert_eq!(config.game.rows, 11);
        assert_eq!(config.game.adjacency, Adjacency::Hex);
        assert_eq!(config.game.strategy, MoverStrategy::Pathfinder);
    }

    #[test]
    fn invalid_game_is_rejected() {
        let path = std::env::temp_dir().join(format!("referee_bad_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "game": { "rows": 40 } }"#).unwrap();
        let result = RefereeConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn missing_file() {
        assert!(RefereeConfig::load(Path::new("/does/not/exist.json")).is_err());
    }
}
