pub mod game;
pub mod players;
pub mod state;

pub use game::{Game, GameOutcome};
pub use players::{PlayerState, STARTING_MONEY};
pub use state::{
    CAPE_BONUS, FLIP_FEE, GameConfig, GameError, GameEvent, GameState, MAX_PLAYERS, PlayerSpec,
    TurnReport,
};
