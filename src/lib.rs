#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod cli;
pub mod engine;
pub mod game;
pub mod players;
pub mod types;

pub use board::{Node, Position, TokenBoard, TokenKind, UnflippedSet};
pub use engine::Oracle;
pub use game::{Game, GameConfig, GameOutcome, GameState};
pub use types::{Action, Archetype, Mode, SpecialStatus};
