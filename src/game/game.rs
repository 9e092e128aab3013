use serde::Serialize;
use uuid::Uuid;

use crate::board::Node;
use crate::engine::Oracle;
use crate::game::{GameConfig, GameError, GameState, PlayerState, TurnReport};
use crate::players::BasePlayer;

/// How a finished (or abandoned) game ended.
#[derive(Debug, Clone, Serialize)]
pub struct GameOutcome {
    pub id: Uuid,
    pub seed: u64,
    /// Seat of the winner, `None` when the turn limit was hit first.
    pub winner: Option<usize>,
    pub winner_name: Option<String>,
    /// Won by bringing home a horseshoe rather than the Star.
    pub horseshoe_win: bool,
    pub turns: u32,
    pub star_location: Option<Node>,
}

pub struct Game {
    pub seed: u64,
    pub id: Uuid,
    pub state: GameState,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            seed: config.seed,
            id: Uuid::new_v4(),
            state: GameState::new(config)?,
        })
    }

    /// Plays until someone wins or the turn limit runs out.
    pub fn play<P: BasePlayer>(
        &mut self,
        oracle: &mut Oracle,
        controllers: &mut [P],
    ) -> Result<GameOutcome, GameError> {
        log::debug!("game {} starting with seed {}", self.id, self.seed);
        while !self.state.is_finished() && self.state.turn_no < self.state.config.turn_limit {
            self.play_tick(oracle, controllers)?;
        }
        if self.state.winner.is_none() {
            log::warn!(
                "game {} stopped at the {}-turn limit",
                self.id,
                self.state.config.turn_limit
            );
        }
        Ok(self.outcome())
    }

    pub fn play_tick<P: BasePlayer>(
        &mut self,
        oracle: &mut Oracle,
        controllers: &mut [P],
    ) -> Result<TurnReport, GameError> {
        let report = self.state.play_turn(oracle, controllers)?;
        for event in &report.events {
            log::trace!("{}: {event}", report.player);
        }
        Ok(report)
    }

    pub fn winner(&self) -> Option<&PlayerState> {
        self.state.winner()
    }

    pub fn horseshoe_win(&self) -> bool {
        self.winner()
            .is_some_and(|player| player.has_horseshoe && !player.has_star)
    }

    pub fn outcome(&self) -> GameOutcome {
        GameOutcome {
            id: self.id,
            seed: self.seed,
            winner: self.state.winner,
            winner_name: self.winner().map(|player| player.name.clone()),
            horseshoe_win: self.horseshoe_win(),
            turns: self.state.turn_no,
            star_location: self.state.tokens.star_location(),
        }
    }
}
