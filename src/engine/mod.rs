//! Travel-time engines over the static board.
//!
//! Shortest distances depend on the board alone and live in process-wide
//! tables. Everything keyed by game state (money, face-down tokens) is
//! memoised inside an [`Oracle`], which takes those inputs explicitly as keys
//! and can therefore be reused from one game to the next.

use std::collections::HashMap;
use std::sync::Arc;

use crate::board::UnflippedSet;

mod distance;
mod home_time;
mod rolls;
mod tokens;

pub use distance::{SEA_PENALTY, shortest_distances};
pub use home_time::{AIR_FARE, CHAIN_LIMIT, Chain, HomeEntry, HomeTable, SEA_FARE};
pub use tokens::{TokenTable, cmp_distances};

#[derive(Debug, Default)]
pub struct Oracle {
    rolls: Vec<f64>,
    home: HashMap<u32, Arc<HomeTable>>,
    tokens: HashMap<(UnflippedSet, bool), Arc<TokenTable>>,
}

impl Oracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of memoised money levels and token layouts.
    pub fn cache_sizes(&self) -> (usize, usize) {
        (self.home.len(), self.tokens.len())
    }

    /// Drops the token tables. They are keyed by which tokens are still face
    /// down, so they rarely carry over from one game to the next.
    pub fn forget_layouts(&mut self) {
        self.tokens.clear();
    }

    pub fn clear(&mut self) {
        self.rolls.clear();
        self.home.clear();
        self.tokens.clear();
    }
}
