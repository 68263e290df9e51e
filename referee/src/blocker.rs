use std::io::{BufRead, StdinLock, Stdout, Write};

use cattrap::{escape_path, shortest_escape, Game, IgnoredBlock, Outcome, Position, TurnResolution};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};

/// The side that places fences.
///
/// The referee asks for a block, hands it to the [`Game`], and reports back
/// what the cat did.
pub trait Blocker {
    fn name(&self) -> &str;

    fn new_game(&mut self, _game: &Game) -> anyhow::Result<()> {
        Ok(())
    }

    /// Returns `None` to give up.
    fn choose_block(&mut self, game: &Game) -> anyhow::Result<Option<Position>>;

    fn block_ignored(&mut self, _block: Position, _reason: IgnoredBlock) -> anyhow::Result<()> {
        Ok(())
    }

    fn turn_resolved(&mut self, _game: &Game, _resolution: TurnResolution) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BlockerKind {
    /// Reads blocks from stdin
    #[default]
    Human,
    /// Blocks a random free cell
    Random,
    /// Blocks the first step of the cat's shortest escape route
    Greedy,
}

/// A person at the terminal, typing `row col` for every block.
pub struct HumanBlocker<R, W> {
    input: R,
    output: W,
    // A re-usable buffer for reading lines.
    buf: String,
}

impl HumanBlocker<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanBlocker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            buf: String::new(),
        }
    }
}

/// Parses `"row col"` or `"row,col"`.
pub fn parse_position(line: &str) -> anyhow::Result<Position> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        anyhow::bail!("Expected two numbers, a row and a column");
    };
    Ok(Position::new(row.parse()?, col.parse()?))
}

impl<R: BufRead, W: Write> Blocker for HumanBlocker<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn new_game(&mut self, game: &Game) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "New game! Keep the cat (C) from reaching the edge. Enter `row col` to place a fence, `q` to give up."
        )?;
        if game.outcome() == Outcome::Escaped {
            writeln!(self.output, "The cat starts on the edge and escapes right away.")?;
        }
        Ok(())
    }

    fn choose_block(&mut self, game: &Game) -> anyhow::Result<Option<Position>> {
        writeln!(self.output, "\n{}", game)?;
        loop {
            write!(self.output, "fence> ")?;
            self.output.flush()?;
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                // EOF
                return Ok(None);
            }
            let line = self.buf.trim();
            if line == "q" || line == "quit" {
                return Ok(None);
            }
            match parse_position(line) {
                Ok(p) => return Ok(Some(p)),
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }

    fn block_ignored(&mut self, _block: Position, reason: IgnoredBlock) -> anyhow::Result<()> {
        writeln!(self.output, "{}, try again.", reason)?;
        Ok(())
    }

    fn turn_resolved(&mut self, game: &Game, resolution: TurnResolution) -> anyhow::Result<()> {
        match (resolution.outcome, resolution.mover) {
            (Outcome::Escaped, _) => {
                writeln!(self.output, "\n{}\nThe cat escaped!", game)?;
            }
            (Outcome::Trapped, _) => {
                writeln!(self.output, "\n{}\nYou trapped the cat!", game)?;
            }
            (Outcome::InProgress, Some(p)) => {
                write!(self.output, "The cat moves to {}.", p)?;
                match escape_path(game.grid(), p, game.blocked()) {
                    Some(path) => {
                        write!(self.output, " Its way out:")?;
                        for step in path {
                            write!(self.output, " {}", step)?;
                        }
                        writeln!(self.output)?;
                    }
                    None => writeln!(self.output, " It has no way out anymore.")?,
                }
            }
            (Outcome::InProgress, None) => {}
        }
        Ok(())
    }
}

/// Blocks a uniformly random free cell.
pub struct RandomBlocker {
    rng: StdRng,
}

impl RandomBlocker {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Blocker for RandomBlocker {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_block(&mut self, game: &Game) -> anyhow::Result<Option<Position>> {
        Ok(game.free_cells().choose(&mut self.rng))
    }
}

/// Always cuts the cat's current shortest escape route right in front of it.
///
/// Once the cat is enclosed, it fills the cat's neighborhood instead.
pub struct GreedyBlocker {
    rng: StdRng,
}

impl GreedyBlocker {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Blocker for GreedyBlocker {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_block(&mut self, game: &Game) -> anyhow::Result<Option<Position>> {
        let route = shortest_escape(game.grid(), game.mover(), game.blocked());
        if let Some(step) = route
            .map(|route| route.first_step)
            .filter(|&step| game.is_free(step))
        {
            return Ok(Some(step));
        }
        let next_to_cat = game
            .grid()
            .neighbors(game.mover())
            .find(|&n| game.is_free(n));
        Ok(next_to_cat.or_else(|| game.free_cells().choose(&mut self.rng)))
    }
}
