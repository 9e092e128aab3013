use std::fmt;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::board::tokens::HORSESHOE_COUNT;
use crate::board::{Node, Position, TokenBoard, TokenKind, UnflippedSet};
use crate::engine::{AIR_FARE, Oracle, SEA_FARE};
use crate::players::{BasePlayer, TurnView};
use crate::types::{Action, Archetype, Mode, SpecialStatus};

use super::players::PlayerState;

pub const MAX_PLAYERS: usize = 6;
/// Paid once, to the first player reaching Capetown.
pub const CAPE_BONUS: u32 = 500;
/// Price of turning a token over on arrival instead of rolling for it.
pub const FLIP_FEE: u32 = 100;
const ENSLAVED_TURNS: u8 = 3;
/// Fixed pace of a penniless sailor.
const SLOW_SEA_STEPS: u32 = 2;

/// Edge squares where desert raiders wait: `(anchor, other end, steps from anchor)`.
const AMBUSH_SPOTS: &[(Node, Node, u32)] = &[(Node::Sahara, Node::DarFur, 2)];
/// Sea squares patrolled by pirates, in the same form.
const CAPTURE_SPOTS: &[(Node, Node, u32)] = &[
    (Node::StHelena, Node::Crossroads7, 1),
    (Node::StHelena, Node::Crossroads9, 1),
    (Node::StHelena, Node::Crossroads9, 7),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub archetype: Archetype,
    pub home: Node,
}

impl PlayerSpec {
    pub fn new(name: impl Into<String>, archetype: Archetype, home: Node) -> Self {
        Self {
            name: name.into(),
            archetype,
            home,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u64,
    /// Once the fifth horseshoe is claimed, drop every player who can no
    /// longer win, and let the Star end the game on the spot.
    pub elimination: bool,
    pub turn_limit: u32,
    /// Shuffle the playing order at setup. Seats keep their config index.
    pub shuffle_order: bool,
    pub players: Vec<PlayerSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            elimination: true,
            turn_limit: 1000,
            shuffle_order: true,
            players: vec![
                PlayerSpec::new("Amy", Archetype::TokenHunter, Node::Cairo),
                PlayerSpec::new("Brook", Archetype::TokenHunter, Node::Tangier),
                PlayerSpec::new("Connor", Archetype::CapeRunner, Node::Cairo),
                PlayerSpec::new("David", Archetype::GoldRunner, Node::Tangier),
            ],
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=MAX_PLAYERS).contains(&self.players.len()) {
            return Err(GameError::PlayerCount(self.players.len()));
        }
        if let Some(spec) = self.players.iter().find(|spec| !spec.home.is_home()) {
            return Err(GameError::NotAHomeCity {
                name: spec.name.clone(),
                node: spec.home,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Travelled {
        mode: Mode,
        roll: Option<u8>,
        destination: Position,
    },
    FlipAttempted {
        roll: u8,
        success: bool,
    },
    FlipBought {
        node: Node,
    },
    NothingFound,
    Enslaved,
    HorseshoeFound {
        claimed: bool,
    },
    Robbed,
    TreasureFound {
        token: TokenKind,
        amount: u32,
        doubled: bool,
    },
    StarFound,
    PlayersEliminated {
        names: Vec<String>,
    },
    CapeBonus {
        amount: u32,
    },
    Ambushed,
    Captured,
    EscapeAttempted {
        roll: u8,
        escaped: bool,
    },
    Labour {
        turns_left: u8,
    },
    GameWon {
        seat: usize,
        name: String,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Travelled {
                mode,
                roll: Some(roll),
                destination,
            } => write!(f, "Rolled a {roll} and travelled by {mode} to {destination}."),
            GameEvent::Travelled {
                mode, destination, ..
            } => write!(f, "Travelled by {mode} to {destination}."),
            GameEvent::FlipAttempted { roll, success: true } => {
                write!(f, "Rolled a {roll} and managed to flip the token.")
            }
            GameEvent::FlipAttempted { roll, .. } => {
                write!(f, "Rolled a {roll}; the token stays face down.")
            }
            GameEvent::FlipBought { node } => {
                write!(f, "Paid {FLIP_FEE} to flip the token in {}.", node.full_name())
            }
            GameEvent::NothingFound => write!(f, "Found nothing."),
            GameEvent::Enslaved => write!(f, "Has to stay as a slave for three turns!"),
            GameEvent::HorseshoeFound { claimed: true } => {
                write!(f, "Found a horseshoe! Now back to Cairo or Tangier!")
            }
            GameEvent::HorseshoeFound { claimed: false } => write!(
                f,
                "Found a horseshoe, but the Star of Africa has not yet been found."
            ),
            GameEvent::Robbed => write!(f, "There was a robber! All money is lost!"),
            GameEvent::TreasureFound {
                token,
                amount,
                doubled,
            } => {
                let name = match token {
                    TokenKind::Topaz => "a topaz",
                    TokenKind::Emerald => "an emerald",
                    _ => "a ruby",
                };
                if *doubled {
                    write!(f, "Found {name} worth double in Gold Coast: {amount} pounds!")
                } else {
                    write!(f, "Found {name}: {amount} pounds!")
                }
            }
            GameEvent::StarFound => {
                write!(f, "Found the Star of Africa!! Now back to Cairo or Tangier!")
            }
            GameEvent::PlayersEliminated { names } => write!(
                f,
                "That was the last horseshoe. Eliminated: {}.",
                names.join(", ")
            ),
            GameEvent::CapeBonus { amount } => {
                write!(f, "First to visit Capetown and got {amount} pounds.")
            }
            GameEvent::Ambushed => write!(f, "Ambushed by the beduins!"),
            GameEvent::Captured => write!(f, "The ship is raided by pirates!"),
            GameEvent::EscapeAttempted { roll, escaped: true } => {
                write!(f, "Rolled a {roll} and escaped! Free to move next turn.")
            }
            GameEvent::EscapeAttempted { roll, .. } => {
                write!(f, "Rolled a {roll} and did not manage to escape.")
            }
            GameEvent::Labour { turns_left: 1 } => {
                write!(f, "Working as a slave. Free to move next turn.")
            }
            GameEvent::Labour { turns_left } => {
                write!(f, "Working as a slave. Free to move in {turns_left} turns.")
            }
            GameEvent::GameWon { name, .. } => write!(f, "{name} won the game!"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("game already completed")]
    GameFinished,
    #[error("between 1 and {MAX_PLAYERS} players are required, got {0}")]
    PlayerCount(usize),
    #[error("{name} must start in Cairo or Tangier, not {node}")]
    NotAHomeCity { name: String, node: Node },
    #[error("no controller for seat {0}")]
    MissingController(usize),
    #[error("action {0} is not available")]
    IllegalAction(Action),
    #[error("destination {index} out of range for {count} options")]
    InvalidDestination { index: usize, count: usize },
    #[error("no destination reachable from {0}")]
    NoDestination(Position),
}

/// Summary of one player's turn, in the order things happened.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    pub turn_no: u32,
    pub seat: usize,
    pub player: String,
    pub money: u32,
    pub position: Position,
    pub description: String,
    pub events: Vec<GameEvent>,
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.player, self.money, self.position)
    }
}

enum Leg {
    Roll,
    SlowSea,
    Flight,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Players still in the game, in playing order.
    pub players: Vec<PlayerState>,
    /// Index into `players` of the next player to act.
    pub current: usize,
    pub turn_no: u32,
    pub tokens: TokenBoard,
    pub unflipped: UnflippedSet,
    pub horseshoes_found: u8,
    pub star_found: bool,
    pub cape_bonus_paid: bool,
    /// Seat of the winner.
    pub winner: Option<usize>,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut players: Vec<PlayerState> = config
            .players
            .iter()
            .enumerate()
            .map(|(seat, spec)| PlayerState::new(seat, spec.name.clone(), spec.archetype, spec.home))
            .collect();
        if config.shuffle_order {
            players.shuffle(&mut rng);
        }
        let tokens = TokenBoard::shuffled(&mut rng);
        Self::with_tokens(config, players, tokens, rng)
    }

    /// Game over a known token layout, seated in config order.
    pub fn with_layout(config: GameConfig, tokens: TokenBoard) -> Result<Self, GameError> {
        let rng = StdRng::seed_from_u64(config.seed);
        let players = config
            .players
            .iter()
            .enumerate()
            .map(|(seat, spec)| PlayerState::new(seat, spec.name.clone(), spec.archetype, spec.home))
            .collect();
        Self::with_tokens(config, players, tokens, rng)
    }

    fn with_tokens(
        config: GameConfig,
        players: Vec<PlayerState>,
        tokens: TokenBoard,
        rng: StdRng,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            players,
            current: 0,
            turn_no: 1,
            tokens,
            unflipped: UnflippedSet::full(),
            horseshoes_found: 0,
            star_found: false,
            cape_bonus_paid: false,
            winner: None,
            rng,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some() || self.players.is_empty()
    }

    pub fn player_by_seat(&self, seat: usize) -> Option<&PlayerState> {
        self.players.iter().find(|player| player.seat == seat)
    }

    pub fn winner(&self) -> Option<&PlayerState> {
        self.winner.and_then(|seat| self.player_by_seat(seat))
    }

    pub fn view(&self, index: usize) -> TurnView<'_> {
        TurnView {
            player: &self.players[index],
            players: &self.players,
            unflipped: self.unflipped,
            star_found: self.star_found,
            turn_no: self.turn_no,
        }
    }

    /// Plays the next player's turn. `controllers` is indexed by seat.
    ///
    /// If a controller answers with something that was not offered, the
    /// acting player is restored and the same turn can be retried.
    pub fn play_turn<P: BasePlayer>(
        &mut self,
        oracle: &mut Oracle,
        controllers: &mut [P],
    ) -> Result<TurnReport, GameError> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }
        if self.current >= self.players.len() {
            self.current = 0;
            self.turn_no += 1;
        }
        let index = self.current;
        let seat = self.players[index].seat;
        let controller = controllers
            .get_mut(seat)
            .ok_or(GameError::MissingController(seat))?;

        let snapshot = self.players[index].clone();
        let mut events = Vec::new();
        if let Err(err) = self.run_turn(index, oracle, controller, &mut events) {
            log::warn!("turn of {} rejected: {err}", snapshot.name);
            self.players[index] = snapshot;
            return Err(err);
        }

        // Eliminations may have shifted the acting player.
        let index = self
            .players
            .iter()
            .position(|player| player.seat == seat)
            .unwrap_or(index.min(self.players.len().saturating_sub(1)));
        let active = &self.players[index];
        if self.winner.is_none() && active.has_won() {
            self.winner = Some(seat);
            events.push(GameEvent::GameWon {
                seat,
                name: active.name.clone(),
            });
        }
        if let Some(name) = self.winner().map(|player| player.name.clone()) {
            log::info!("{name} won on turn {}", self.turn_no);
        }

        let active = &self.players[index];
        let report = TurnReport {
            turn_no: self.turn_no,
            seat,
            player: active.name.clone(),
            money: active.money,
            position: active.position,
            description: active.position.describe(active.offshore, &self.unflipped),
            events,
        };
        log::debug!("turn {}: {report}", self.turn_no);
        self.current = index + 1;
        Ok(report)
    }

    fn run_turn<P: BasePlayer>(
        &mut self,
        index: usize,
        oracle: &mut Oracle,
        controller: &mut P,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        self.retarget(index);
        match self.players[index].status {
            SpecialStatus::Free => self.free_turn(index, oracle, controller, events),
            SpecialStatus::ForcedSlowSea => {
                self.travel(index, Mode::Sea, Leg::SlowSea, oracle, controller, events)
            }
            SpecialStatus::Ambushed | SpecialStatus::Captured => {
                self.escape(index, events);
                Ok(())
            }
            SpecialStatus::Enslaved(turns_left) => {
                self.labour(index, turns_left, events);
                Ok(())
            }
        }
    }

    /// Racers that have lost their reason to race go hunting instead.
    fn retarget(&mut self, index: usize) {
        let player = &mut self.players[index];
        if player.is_carrying() || self.star_found {
            return;
        }
        let done = match player.archetype {
            Archetype::CapeRunner => self.cape_bonus_paid,
            Archetype::GoldRunner => !self.unflipped.contains(Node::GoldCoast),
            _ => false,
        };
        if done {
            log::debug!("{} switches from {} to token hunting", player.name, player.archetype);
            player.archetype = Archetype::TokenHunter;
        }
    }

    fn free_turn<P: BasePlayer>(
        &mut self,
        index: usize,
        oracle: &mut Oracle,
        controller: &mut P,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let possible = self.players[index].turn_possibilities(&self.unflipped);
        let action = match possible.as_slice() {
            [only] => *only,
            _ => {
                let action = controller.choose_action(oracle, &self.view(index), &possible);
                if !possible.contains(&action) {
                    return Err(GameError::IllegalAction(action));
                }
                action
            }
        };
        log::trace!("{} chose {action}", self.players[index].name);

        match action {
            Action::Flip => {
                self.try_flip(index, events);
                Ok(())
            }
            Action::Land => self.travel(index, Mode::Land, Leg::Roll, oracle, controller, events),
            Action::Sea => {
                let player = &mut self.players[index];
                let leg = if player.offshore {
                    Leg::Roll
                } else if player.money == 0 {
                    player.offshore = true;
                    player.status = SpecialStatus::ForcedSlowSea;
                    Leg::SlowSea
                } else {
                    player.offshore = true;
                    player.money -= SEA_FARE;
                    Leg::Roll
                };
                self.travel(index, Mode::Sea, leg, oracle, controller, events)
            }
            Action::Air => {
                self.players[index].money -= AIR_FARE;
                self.travel(index, Mode::Air, Leg::Flight, oracle, controller, events)
            }
        }
    }

    fn travel<P: BasePlayer>(
        &mut self,
        index: usize,
        mode: Mode,
        leg: Leg,
        oracle: &mut Oracle,
        controller: &mut P,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let position = self.players[index].position;
        let (options, roll) = match leg {
            Leg::Flight => {
                let airport = position.city().ok_or(GameError::IllegalAction(Action::Air))?;
                let options: Vec<Position> =
                    airport.air_routes().iter().map(|&next| Position::At(next)).collect();
                (options, None)
            }
            Leg::SlowSea => (self.players[index].destination_options(SLOW_SEA_STEPS), None),
            Leg::Roll => {
                let roll = self.roll_die();
                (self.players[index].destination_options(u32::from(roll)), Some(roll))
            }
        };

        let choice = match options.len() {
            0 => return Err(GameError::NoDestination(position)),
            1 => 0,
            _ => controller.choose_destination(oracle, &self.view(index), &options),
        };
        let destination = *options.get(choice).ok_or(GameError::InvalidDestination {
            index: choice,
            count: options.len(),
        })?;
        events.push(GameEvent::Travelled {
            mode,
            roll,
            destination,
        });
        self.move_to(index, destination, controller, events);
        Ok(())
    }

    fn move_to<P: BasePlayer>(
        &mut self,
        index: usize,
        destination: Position,
        controller: &mut P,
        events: &mut Vec<GameEvent>,
    ) {
        let player = &mut self.players[index];
        player.position = destination;
        let Some(city) = destination.city() else {
            if let Some(hazard) = hazard_at(&destination) {
                player.status = hazard;
                events.push(match hazard {
                    SpecialStatus::Ambushed => GameEvent::Ambushed,
                    _ => GameEvent::Captured,
                });
            }
            return;
        };

        player.offshore = false;
        player.status = SpecialStatus::Free;
        if city == Node::Capetown && !self.cape_bonus_paid {
            self.cape_bonus_paid = true;
            player.money += CAPE_BONUS;
            events.push(GameEvent::CapeBonus {
                amount: CAPE_BONUS,
            });
        }
        if self.unflipped.contains(city)
            && self.players[index].money >= FLIP_FEE
            && controller.accept_flip(&self.view(index))
        {
            self.players[index].money -= FLIP_FEE;
            events.push(GameEvent::FlipBought { node: city });
            self.flip(index, events);
        }
    }

    fn try_flip(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        let roll = self.roll_die();
        let success = roll > 3;
        events.push(GameEvent::FlipAttempted { roll, success });
        if success {
            self.flip(index, events);
        }
    }

    /// Turns over the token under the player and applies its effect.
    fn flip(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        let Some(node) = self.players[index].position.city() else {
            return;
        };
        let Some(token) = self.tokens.get(node) else {
            return;
        };
        self.unflipped.flip(node);
        let player = &mut self.players[index];
        log::debug!("{} flipped {token} in {}", player.name, node.full_name());

        match token {
            TokenKind::Empty => {
                events.push(GameEvent::NothingFound);
                if node == Node::SlaveCoast {
                    player.status = SpecialStatus::Enslaved(ENSLAVED_TURNS);
                    events.push(GameEvent::Enslaved);
                }
            }
            TokenKind::Horseshoe => {
                self.horseshoes_found += 1;
                let claimed = self.star_found;
                player.has_horseshoe |= claimed;
                events.push(GameEvent::HorseshoeFound { claimed });
                if claimed && self.horseshoes_found == HORSESHOE_COUNT && self.config.elimination {
                    self.eliminate(events);
                }
            }
            TokenKind::Robber => {
                player.money = 0;
                events.push(GameEvent::Robbed);
            }
            TokenKind::Topaz | TokenKind::Emerald | TokenKind::Ruby => {
                let doubled = node == Node::GoldCoast;
                let amount = token.payout() * if doubled { 2 } else { 1 };
                player.money += amount;
                events.push(GameEvent::TreasureFound {
                    token,
                    amount,
                    doubled,
                });
            }
            TokenKind::Star => {
                self.star_found = true;
                player.has_star = true;
                events.push(GameEvent::StarFound);
                if self.horseshoes_found == HORSESHOE_COUNT && self.config.elimination {
                    self.winner = Some(player.seat);
                    events.push(GameEvent::GameWon {
                        seat: player.seat,
                        name: player.name.clone(),
                    });
                }
            }
        }
    }

    /// Drops every player holding neither the Star nor a horseshoe.
    fn eliminate(&mut self, events: &mut Vec<GameEvent>) {
        let (keep, gone): (Vec<_>, Vec<_>) = std::mem::take(&mut self.players)
            .into_iter()
            .partition(PlayerState::is_carrying);
        self.players = keep;
        if !gone.is_empty() {
            let names: Vec<String> = gone.into_iter().map(|player| player.name).collect();
            log::info!("eliminated: {}", names.join(", "));
            events.push(GameEvent::PlayersEliminated { names });
        }
    }

    fn escape(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        let roll = self.roll_die();
        let player = &mut self.players[index];
        events.push(match player.status {
            SpecialStatus::Ambushed => GameEvent::Ambushed,
            _ => GameEvent::Captured,
        });
        let escaped = roll < 3;
        if escaped {
            player.status = SpecialStatus::Free;
        }
        events.push(GameEvent::EscapeAttempted { roll, escaped });
    }

    fn labour(&mut self, index: usize, turns_left: u8, events: &mut Vec<GameEvent>) {
        self.players[index].status = match turns_left {
            0 | 1 => SpecialStatus::Free,
            n => SpecialStatus::Enslaved(n - 1),
        };
        events.push(GameEvent::Labour { turns_left });
    }

    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Hazard waiting on an edge square, whichever way the edge is written.
fn hazard_at(position: &Position) -> Option<SpecialStatus> {
    let Position::Between {
        from,
        to,
        from_steps,
        to_steps,
    } = *position
    else {
        return None;
    };
    let matches = |&(anchor, other, steps): &(Node, Node, u32)| {
        (from == anchor && to == other && from_steps == steps)
            || (to == anchor && from == other && to_steps == steps)
    };
    if AMBUSH_SPOTS.iter().any(matches) {
        Some(SpecialStatus::Ambushed)
    } else if CAPTURE_SPOTS.iter().any(matches) {
        Some(SpecialStatus::Captured)
    } else {
        None
    }
}
