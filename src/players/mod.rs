pub mod ai;
pub mod base;
pub mod random;
pub mod strategy;

pub use ai::ArchetypePlayer;
pub use base::{BasePlayer, TurnView};
pub use random::RandomPlayer;
