use std::path::PathBuf;

use cattrap::{Adjacency, MoverStrategy};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use referee::{
    play_match, Blocker, BlockerKind, GreedyBlocker, HumanBlocker, RandomBlocker, RefereeConfig,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to a JSON config file. Command line options take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rows of the grid
    #[arg(long)]
    rows: Option<i8>,

    /// Number of columns of the grid
    #[arg(long)]
    cols: Option<i8>,

    /// "hex" or "orthogonal"
    #[arg(short, long, value_parser = parse_adjacency)]
    adjacency: Option<Adjacency>,

    /// How many plies the cat looks ahead
    #[arg(short, long)]
    depth: Option<u32>,

    /// Let the cat follow its shortest escape route instead of searching
    #[arg(long, default_value_t = false)]
    pathfinder: bool,

    /// Who places the fences
    #[arg(short, long, value_enum)]
    blocker: Option<BlockerKind>,

    /// How many games to play
    #[arg(short, long)]
    num_games: Option<usize>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn parse_adjacency(s: &str) -> Result<Adjacency, String> {
    match s {
        "hex" => Ok(Adjacency::Hex),
        "orthogonal" | "orth" => Ok(Adjacency::Orthogonal),
        _ => Err(format!("unknown adjacency '{}', expected 'hex' or 'orthogonal'", s)),
    }
}

impl Args {
    fn apply_to(&self, config: &mut RefereeConfig) {
        let game = &mut config.game;
        if let Some(rows) = self.rows {
            game.rows = rows;
        }
        if let Some(cols) = self.cols {
            game.cols = cols;
        }
        if let Some(adjacency) = self.adjacency {
            game.adjacency = adjacency;
        }
        if let Some(depth) = self.depth {
            game.strategy = MoverStrategy::Minimax { depth };
        }
        if self.pathfinder {
            game.strategy = MoverStrategy::Pathfinder;
        }
        if let Some(blocker) = self.blocker {
            config.blocker = blocker;
        }
        if let Some(num_games) = self.num_games {
            config.num_games = num_games;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let mut config = match &args.config {
        Some(path) => RefereeConfig::load(path)?,
        None => RefereeConfig::default(),
    };
    args.apply_to(&mut config);
    // Surface config errors before anything is printed for the human
    config.game.validate()?;

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut blocker: Box<dyn Blocker> = match config.blocker {
        BlockerKind::Human => Box::new(HumanBlocker::stdio()),
        BlockerKind::Random => Box::new(RandomBlocker::new(StdRng::seed_from_u64(rng.gen()))),
        BlockerKind::Greedy => Box::new(GreedyBlocker::new(StdRng::seed_from_u64(rng.gen()))),
    };

    let num_games = config.num_games.max(1);
    let score = play_match(&config.game, blocker.as_mut(), num_games, &mut rng)?;

    eprintln!(
        "End result:\n- {} escapes by the cat\n- {} traps by {}\n- {} games given up",
        score.escaped,
        score.trapped,
        blocker.name(),
        score.resigned
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
