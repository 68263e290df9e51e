pub use cell_set::*;
pub use config::*;
pub use errors::*;
pub use eval::*;
pub use game::*;
pub use grid::*;
pub use pathfinder::*;
pub use search::*;
pub use setup::*;

#[cfg(test)]
mod arbitrary;
mod cell_set;
mod config;
mod errors;
mod eval;
mod game;
mod grid;
mod pathfinder;
mod search;
mod setup;
mod visualization;
