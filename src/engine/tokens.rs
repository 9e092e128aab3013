use std::cmp::Ordering;
use std::sync::Arc;

use super::{Oracle, shortest_distances};
use crate::board::{Node, Position, UnflippedSet};

/// For every node, the ascending distances to each face-down token.
#[derive(Debug, Clone)]
pub struct TokenTable {
    unflipped: UnflippedSet,
    poor: bool,
    rows: Vec<Vec<f64>>,
}

impl TokenTable {
    fn build(unflipped: UnflippedSet, poor: bool) -> Self {
        let sources: Vec<_> = unflipped
            .iter()
            .map(|token| shortest_distances(token, poor))
            .collect();
        let rows = Node::ALL
            .iter()
            .map(|node| {
                let mut row: Vec<f64> = sources.iter().map(|dist| dist[node.index()]).collect();
                row.sort_by(f64::total_cmp);
                row
            })
            .collect();
        Self {
            unflipped,
            poor,
            rows,
        }
    }

    pub fn unflipped(&self) -> UnflippedSet {
        self.unflipped
    }

    pub fn is_poor(&self) -> bool {
        self.poor
    }

    pub fn at(&self, node: Node) -> &[f64] {
        &self.rows[node.index()]
    }

    /// Distances from a position; between nodes, the better of the two ends
    /// once the remaining steps are added.
    pub fn from_position(&self, position: &Position) -> Vec<f64> {
        match *position {
            Position::At(node) => self.at(node).to_vec(),
            Position::Between {
                from,
                to,
                from_steps,
                to_steps,
            } => {
                let shifted = |node: Node, steps: u32| -> Vec<f64> {
                    self.at(node).iter().map(|d| d + f64::from(steps)).collect()
                };
                let first = shifted(from, from_steps);
                let second = shifted(to, to_steps);
                if cmp_distances(&second, &first) == Ordering::Less {
                    second
                } else {
                    first
                }
            }
        }
    }
}

/// Lexicographic order on distance lists: nearest token first, then the
/// next nearest, and so on. A strict prefix sorts first.
pub fn cmp_distances(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

impl Oracle {
    pub fn token_distances(&mut self, unflipped: UnflippedSet, poor: bool) -> Arc<TokenTable> {
        Arc::clone(
            self.tokens
                .entry((unflipped, poor))
                .or_insert_with(|| Arc::new(TokenTable::build(unflipped, poor))),
        )
    }
}
