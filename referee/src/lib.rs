mod blocker;
mod config;
mod game;
pub use blocker::*;
pub use config::*;
pub use game::*;
