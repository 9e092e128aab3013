use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{Node, TOKEN_NODE_COUNT};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Empty,
    Horseshoe,
    Robber,
    Topaz,
    Emerald,
    Ruby,
    Star,
}

impl TokenKind {
    /// Face value paid out on discovery, before any Gold Coast doubling.
    pub fn payout(self) -> u32 {
        match self {
            TokenKind::Topaz => 300,
            TokenKind::Emerald => 600,
            TokenKind::Ruby => 1000,
            _ => 0,
        }
    }
}

const DISTRIBUTION: &[(TokenKind, usize)] = &[
    (TokenKind::Empty, 12),
    (TokenKind::Horseshoe, 5),
    (TokenKind::Robber, 3),
    (TokenKind::Topaz, 4),
    (TokenKind::Emerald, 3),
    (TokenKind::Ruby, 2),
    (TokenKind::Star, 1),
];

pub const HORSESHOE_COUNT: u8 = 5;

/// The face-down token under each of the 30 token nodes. Fixed for the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBoard {
    tokens: Vec<TokenKind>,
}

impl TokenBoard {
    pub fn shuffled(rng: &mut impl rand::Rng) -> Self {
        let mut tokens = Self::standard_set();
        tokens.shuffle(rng);
        Self { tokens }
    }

    /// Board with tokens laid out in node order.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one token is given per token node.
    pub fn from_layout(tokens: Vec<TokenKind>) -> Self {
        assert_eq!(
            tokens.len(),
            TOKEN_NODE_COUNT,
            "one token per token node is required"
        );
        Self { tokens }
    }

    pub fn get(&self, node: Node) -> Option<TokenKind> {
        self.tokens.get(node.index()).copied()
    }

    pub fn star_location(&self) -> Option<Node> {
        self.tokens
            .iter()
            .position(|token| *token == TokenKind::Star)
            .map(Node::from_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Node, TokenKind)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (Node::from_index(index), *token))
    }

    fn standard_set() -> Vec<TokenKind> {
        let mut tokens = Vec::with_capacity(TOKEN_NODE_COUNT);
        for (token, count) in DISTRIBUTION {
            tokens.extend(std::iter::repeat(*token).take(*count));
        }
        tokens
    }
}

/// Bit set of nodes whose token is still face down.
///
/// Flips only ever clear bits, so the set doubles as an immutable cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnflippedSet(u64);

impl UnflippedSet {
    pub fn full() -> Self {
        Self((1u64 << TOKEN_NODE_COUNT) - 1)
    }

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut set = Self::empty();
        for node in nodes.into_iter().filter(|node| node.holds_token()) {
            set.0 |= 1u64 << node.index();
        }
        set
    }

    pub fn contains(&self, node: Node) -> bool {
        self.0 & (1u64 << node.index()) != 0
    }

    /// Marks the token at `node` as flipped. Returns whether it was face down.
    pub fn flip(&mut self, node: Node) -> bool {
        let was_set = self.contains(node);
        self.0 &= !(1u64 << node.index());
        was_set
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        Node::ALL.into_iter().filter(|node| self.contains(*node))
    }
}

impl Default for UnflippedSet {
    fn default() -> Self {
        Self::full()
    }
}
