pub mod human_player;
pub mod players;
pub mod stats;
pub mod tui;

pub use human_player::HumanPlayer;
pub use players::{
    CLI_PLAYERS, CliPlayer, LineupError, PlayerInstance, SAMPLE_NAMES, create_player,
    parse_lineup, print_player_help, resolve_lineup,
};
pub use stats::{GameStats, LocationStats, Spread, StatisticsAccumulator};
