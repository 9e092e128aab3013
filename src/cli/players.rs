use std::str::FromStr;

use crate::board::{Node, Position};
use crate::cli::HumanPlayer;
use crate::engine::Oracle;
use crate::game::{GameConfig, MAX_PLAYERS, PlayerSpec, TurnReport};
use crate::players::{ArchetypePlayer, BasePlayer, RandomPlayer, TurnView};
use crate::types::{Action, Archetype};

pub const SAMPLE_NAMES: [&str; MAX_PLAYERS] = ["Amy", "Brook", "Connor", "David", "Emma", "Felix"];

pub struct CliPlayer {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CLI_PLAYERS: &[CliPlayer] = &[
    CliPlayer {
        code: "T",
        name: "TokenHunter",
        description: "Always heads for the nearest face-down token, then runs home with the first prize.",
    },
    CliPlayer {
        code: "C",
        name: "CapeRunner",
        description: "Races for the 500 pound bonus in Capetown, then hunts tokens.",
    },
    CliPlayer {
        code: "G",
        name: "GoldRunner",
        description: "Races for the doubled gem payouts in Gold Coast, then hunts tokens.",
    },
    CliPlayer {
        code: "R",
        name: "RandomPlayer",
        description: "Chooses actions and destinations at random.",
    },
    CliPlayer {
        code: "H",
        name: "Human",
        description: "Plays from the terminal.",
    },
];

#[derive(Debug, thiserror::Error)]
pub enum LineupError {
    #[error("between 1 and {MAX_PLAYERS} players are required, got {0}")]
    Count(usize),
    #[error("unknown player code '{0}' (use --help-players to see available codes)")]
    UnknownCode(String),
    #[error("'{0}' is not a starting city, use Cai or Tan")]
    UnknownHome(String),
}

#[derive(Debug, Clone)]
pub enum PlayerInstance {
    Archetype(ArchetypePlayer),
    Random(RandomPlayer),
    Human(HumanPlayer),
}

impl PlayerInstance {
    pub fn is_human(&self) -> bool {
        matches!(self, PlayerInstance::Human(_))
    }

    /// Lets human seats see what happened since their last prompt.
    pub fn observe(&mut self, report: &TurnReport) {
        if let PlayerInstance::Human(p) = self {
            p.record(report);
        }
    }

    /// Controller for a seat written out in a config file.
    pub fn for_spec(spec: &PlayerSpec) -> Self {
        match spec.archetype {
            Archetype::Human => PlayerInstance::Human(HumanPlayer::new()),
            _ => PlayerInstance::Archetype(ArchetypePlayer),
        }
    }

    /// The same seat ready for another game, with fresh dice.
    pub fn reseeded(&self, seed: u64) -> Self {
        match self {
            PlayerInstance::Random(_) => PlayerInstance::Random(RandomPlayer::new(seed)),
            other => other.clone(),
        }
    }
}

impl BasePlayer for PlayerInstance {
    fn choose_action(
        &mut self,
        oracle: &mut Oracle,
        view: &TurnView<'_>,
        options: &[Action],
    ) -> Action {
        match self {
            PlayerInstance::Archetype(p) => p.choose_action(oracle, view, options),
            PlayerInstance::Random(p) => p.choose_action(oracle, view, options),
            PlayerInstance::Human(p) => p.choose_action(oracle, view, options),
        }
    }

    fn choose_destination(
        &mut self,
        oracle: &mut Oracle,
        view: &TurnView<'_>,
        options: &[Position],
    ) -> usize {
        match self {
            PlayerInstance::Archetype(p) => p.choose_destination(oracle, view, options),
            PlayerInstance::Random(p) => p.choose_destination(oracle, view, options),
            PlayerInstance::Human(p) => p.choose_destination(oracle, view, options),
        }
    }

    fn accept_flip(&mut self, view: &TurnView<'_>) -> bool {
        match self {
            PlayerInstance::Archetype(p) => p.accept_flip(view),
            PlayerInstance::Random(p) => p.accept_flip(view),
            PlayerInstance::Human(p) => p.accept_flip(view),
        }
    }
}

/// Builds one seat from a code. Returns `None` for an unknown code.
pub fn create_player(code: &str, seed: u64) -> Option<(Archetype, PlayerInstance)> {
    let ai = |archetype| Some((archetype, PlayerInstance::Archetype(ArchetypePlayer)));
    match code.to_uppercase().as_str() {
        "T" => ai(Archetype::TokenHunter),
        "C" => ai(Archetype::CapeRunner),
        "G" => ai(Archetype::GoldRunner),
        "R" => Some((
            Archetype::TokenHunter,
            PlayerInstance::Random(RandomPlayer::new(seed)),
        )),
        "H" => Some((Archetype::Human, PlayerInstance::Human(HumanPlayer::new()))),
        _ => None,
    }
}

/// Parses a lineup such as `T:Cai,G:Tan,H:Tan:Emma`.
///
/// Each seat is `CODE[:HOME[:NAME]]`. Homes default to alternating Cairo
/// and Tangier, names to the seat's sample name.
pub fn parse_lineup(
    lineup: &str,
    seed: u64,
) -> Result<Vec<(PlayerSpec, PlayerInstance)>, LineupError> {
    let keys: Vec<&str> = lineup.split(',').map(str::trim).filter(|key| !key.is_empty()).collect();
    if !(1..=MAX_PLAYERS).contains(&keys.len()) {
        return Err(LineupError::Count(keys.len()));
    }

    keys.iter()
        .enumerate()
        .map(|(seat, key)| {
            let mut parts = key.split(':');
            let code = parts.next().unwrap_or_default();
            let (archetype, instance) = create_player(code, seed.wrapping_add(seat as u64))
                .ok_or_else(|| LineupError::UnknownCode(code.to_string()))?;
            let home = match parts.next() {
                Some(raw) => parse_home(raw)?,
                None if seat % 2 == 0 => Node::Cairo,
                None => Node::Tangier,
            };
            let name = parts.next().unwrap_or(SAMPLE_NAMES[seat]);
            Ok((PlayerSpec::new(name, archetype, home), instance))
        })
        .collect()
}

/// Seats for a run: the `--players` lineup when given, else the config's.
pub fn resolve_lineup(
    lineup: Option<&str>,
    config: &GameConfig,
) -> Result<Vec<(PlayerSpec, PlayerInstance)>, LineupError> {
    match lineup {
        Some(raw) => parse_lineup(raw, config.seed),
        None => Ok(config
            .players
            .iter()
            .map(|spec| (spec.clone(), PlayerInstance::for_spec(spec)))
            .collect()),
    }
}

fn parse_home(raw: &str) -> Result<Node, LineupError> {
    let node = match raw.to_lowercase().as_str() {
        "c" | "cai" | "cairo" => Some(Node::Cairo),
        "t" | "tan" | "tangier" => Some(Node::Tangier),
        _ => Node::from_str(raw).ok(),
    };
    node.filter(|node| node.is_home())
        .ok_or_else(|| LineupError::UnknownHome(raw.to_string()))
}

pub fn print_player_help() {
    println!("Player Legend:");
    println!("{:<5} {:<15} {}", "CODE", "PLAYER", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for player in CLI_PLAYERS {
        println!("{:<5} {:<15} {}", player.code, player.name, player.description);
    }
    println!("\nSeats are written CODE[:HOME[:NAME]], e.g. T:Cai,G:Tan,H:Tan:Emma");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lineup_parses() {
        let lineup = parse_lineup("T:Cai,T:Tan,C:Cai,G:Tan", 7).unwrap();
        let specs: Vec<_> = lineup.iter().map(|(spec, _)| spec.clone()).collect();
        assert_eq!(
            specs,
            vec![
                PlayerSpec::new("Amy", Archetype::TokenHunter, Node::Cairo),
                PlayerSpec::new("Brook", Archetype::TokenHunter, Node::Tangier),
                PlayerSpec::new("Connor", Archetype::CapeRunner, Node::Cairo),
                PlayerSpec::new("David", Archetype::GoldRunner, Node::Tangier),
            ]
        );
        assert!(lineup.iter().all(|(_, p)| !p.is_human()));
    }

    #[test]
    fn homes_and_names_are_optional() {
        let lineup = parse_lineup("r, h:tangier:Emma", 0).unwrap();
        assert_eq!(lineup[0].0.home, Node::Cairo);
        assert!(matches!(lineup[0].1, PlayerInstance::Random(_)));
        assert_eq!(lineup[1].0, PlayerSpec::new("Emma", Archetype::Human, Node::Tangier));
        assert!(lineup[1].1.is_human());
    }

    #[test]
    fn config_seats_are_used_unless_a_lineup_is_given() {
        let config = GameConfig {
            players: vec![
                PlayerSpec::new("Emma", Archetype::GoldRunner, Node::Tangier),
                PlayerSpec::new("Felix", Archetype::CapeRunner, Node::Cairo),
            ],
            ..GameConfig::default()
        };
        let seats = resolve_lineup(None, &config).unwrap();
        let specs: Vec<_> = seats.iter().map(|(spec, _)| spec.clone()).collect();
        assert_eq!(specs, config.players);
        assert!(seats.iter().all(|(_, p)| matches!(p, PlayerInstance::Archetype(_))));

        let seats = resolve_lineup(Some("R:Tan,T"), &config).unwrap();
        assert_eq!(seats.len(), 2);
        assert_eq!(seats[0].0.name, "Amy");
        assert!(matches!(seats[0].1, PlayerInstance::Random(_)));
        assert!(matches!(seats[1].1.reseeded(3), PlayerInstance::Archetype(_)));
        assert!(matches!(seats[0].1.reseeded(3), PlayerInstance::Random(_)));
    }

    #[test]
    fn bad_lineups_are_rejected() {
        assert!(matches!(parse_lineup("", 0), Err(LineupError::Count(0))));
        assert!(matches!(
            parse_lineup("T,T,T,T,T,T,T", 0),
            Err(LineupError::Count(7))
        ));
        assert!(matches!(parse_lineup("X", 0), Err(LineupError::UnknownCode(code)) if code == "X"));
        assert!(matches!(parse_lineup("T:Egy", 0), Err(LineupError::UnknownHome(_))));
    }
}
