use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::board::Position;
use crate::engine::Oracle;
use crate::players::base::{BasePlayer, TurnView};
use crate::types::Action;

/// Picks uniformly among whatever it is offered. Seeded for replayable games.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl BasePlayer for RandomPlayer {
    fn choose_action(
        &mut self,
        _oracle: &mut Oracle,
        _view: &TurnView<'_>,
        options: &[Action],
    ) -> Action {
        options.choose(&mut self.rng).copied().unwrap_or(Action::Land)
    }

    fn choose_destination(
        &mut self,
        _oracle: &mut Oracle,
        _view: &TurnView<'_>,
        options: &[Position],
    ) -> usize {
        self.rng.gen_range(0..options.len().max(1))
    }

    fn accept_flip(&mut self, _view: &TurnView<'_>) -> bool {
        self.rng.gen_bool(0.5)
    }
}
