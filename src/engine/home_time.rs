use std::ops::Index;
use std::sync::Arc;

use serde::Serialize;

use super::Oracle;
use crate::board::{HOME_CITIES, NODE_COUNT, Node, Position};
use crate::types::Mode;

pub const SEA_FARE: u32 = 100;
pub const AIR_FARE: u32 = 300;
/// A run of consecutive legs is only valued as a single dice count while it
/// stays shorter than this.
pub const CHAIN_LIMIT: u32 = 31;

/// Start of the uninterrupted run that ends at a node, and its length in steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub start: Node,
    pub steps: u32,
}

impl Chain {
    pub fn origin(node: Node) -> Self {
        Self {
            start: node,
            steps: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HomeEntry {
    /// Expected turns to the nearer home city.
    pub turns: f64,
    /// How the last leg into this node is travelled; `None` at the homes.
    pub mode: Option<Mode>,
    pub chain: Chain,
}

/// Expected turns home from every node for one money level.
#[derive(Debug, Clone, Serialize)]
pub struct HomeTable {
    money: u32,
    entries: Vec<HomeEntry>,
}

impl HomeTable {
    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn iter(&self) -> impl Iterator<Item = (Node, &HomeEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (Node::from_index(index), entry))
    }
}

impl Index<Node> for HomeTable {
    type Output = HomeEntry;

    fn index(&self, node: Node) -> &HomeEntry {
        &self.entries[node.index()]
    }
}

impl Oracle {
    /// Home-time table for a traveller holding `money`.
    ///
    /// Fares come in hundreds, so money is rounded down to a multiple of
    /// [`SEA_FARE`]. A table never promises a slower trip than the table one
    /// fare cheaper: every money level can always choose to spend less.
    pub fn home_times(&mut self, money: u32) -> Arc<HomeTable> {
        let money = money - money % SEA_FARE;
        if let Some(table) = self.home.get(&money) {
            return Arc::clone(table);
        }
        let mut level = 0;
        while level <= money {
            if !self.home.contains_key(&level) {
                let cheaper = level
                    .checked_sub(SEA_FARE)
                    .and_then(|m| self.home.get(&m).cloned());
                let flight = level
                    .checked_sub(AIR_FARE)
                    .and_then(|m| self.home.get(&m).cloned());
                let table = self.build_home_table(level, cheaper.as_deref(), flight.as_deref());
                log::trace!("home-time table built for money {level}");
                self.home.insert(level, Arc::new(table));
            }
            level += SEA_FARE;
        }
        Arc::clone(&self.home[&money])
    }

    /// Expected turns home from any position, including mid-edge ones.
    ///
    /// Between two nodes the remaining steps are folded into whichever
    /// endpoint's chain gives the shorter estimate.
    pub fn home_turns(&mut self, money: u32, position: &Position) -> f64 {
        let table = self.home_times(money);
        match *position {
            Position::At(node) => table[node].turns,
            Position::Between {
                from,
                to,
                from_steps,
                to_steps,
            } => {
                let mut via = |end: Node, steps: u32| {
                    let chain = table[end].chain;
                    self.expected_rolls(steps + chain.steps) + table[chain.start].turns
                };
                let first = via(from, from_steps);
                first.min(via(to, to_steps))
            }
        }
    }

    fn build_home_table(
        &mut self,
        money: u32,
        cheaper: Option<&HomeTable>,
        flight: Option<&HomeTable>,
    ) -> HomeTable {
        let mut turns = [f64::INFINITY; NODE_COUNT];
        let mut modes: [Option<Mode>; NODE_COUNT] = [None; NODE_COUNT];
        let mut chains: [Chain; NODE_COUNT] =
            std::array::from_fn(|index| Chain::origin(Node::from_index(index)));
        let mut visited = [false; NODE_COUNT];
        for home in HOME_CITIES {
            turns[home.index()] = 0.0;
        }

        // Ties pick the highest index.
        while let Some(current) = (0..NODE_COUNT)
            .rev()
            .filter(|&i| !visited[i] && turns[i].is_finite())
            .min_by(|&a, &b| turns[a].total_cmp(&turns[b]))
        {
            let node = Node::from_index(current);
            let here = turns[current];
            let chain = chains[current];

            for &(next, weight) in node.land_routes() {
                let mut candidate = here + self.expected_rolls(weight);
                if chain.steps + weight < CHAIN_LIMIT {
                    let run = turns[chain.start.index()] + self.expected_rolls(chain.steps + weight);
                    candidate = candidate.min(run);
                }
                let target = next.index();
                if candidate < turns[target] {
                    turns[target] = candidate;
                    chains[target] = Chain {
                        start: chain.start,
                        steps: chain.steps + weight,
                    };
                    modes[target] = Some(Mode::Land);
                }
            }

            for &(next, weight) in node.sea_routes() {
                let candidate = match cheaper {
                    // Penniless sailors drift two squares per turn.
                    None if node.is_crossroads() => {
                        turns[chain.start.index()] + f64::from((chain.steps + weight + 1) / 2)
                    }
                    None => here + f64::from((weight + 1) / 2),
                    Some(cheaper) if node.is_crossroads() => {
                        cheaper[chain.start].turns + self.expected_rolls(chain.steps + weight)
                    }
                    // The fare is paid when leaving harbour, not at sea crossroads.
                    Some(_) if next.is_crossroads() => here + self.expected_rolls(weight),
                    Some(cheaper) => cheaper[node].turns + self.expected_rolls(weight),
                };
                let target = next.index();
                if candidate < turns[target] {
                    turns[target] = candidate;
                    chains[target] = if next.is_crossroads() {
                        Chain {
                            start: node,
                            steps: weight,
                        }
                    } else {
                        Chain::origin(next)
                    };
                    modes[target] = Some(Mode::Sea);
                }
            }

            if let Some(flight) = flight {
                for &next in node.air_routes() {
                    let candidate = flight[node].turns + 1.0;
                    let target = next.index();
                    if candidate < turns[target] {
                        turns[target] = candidate;
                        chains[target] = Chain::origin(next);
                        modes[target] = Some(Mode::Air);
                    }
                }
            }
            visited[current] = true;
        }

        let mut entries: Vec<HomeEntry> = (0..NODE_COUNT)
            .map(|index| HomeEntry {
                turns: turns[index],
                mode: modes[index],
                chain: chains[index],
            })
            .collect();
        if let Some(cheaper) = cheaper {
            for (entry, cheap) in entries.iter_mut().zip(&cheaper.entries) {
                if cheap.turns < entry.turns {
                    *entry = *cheap;
                }
            }
        }
        HomeTable { money, entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_entry(table: &HomeTable, node: Node, turns: f64, mode: Option<Mode>) {
        let entry = table[node];
        assert!(
            (entry.turns - turns).abs() < 1e-6,
            "{node} at {}: {} != {turns}",
            table.money(),
            entry.turns
        );
        assert_eq!(entry.mode, mode, "{node} at {}", table.money());
    }

    fn chain(start: Node, steps: u32) -> Chain {
        Chain { start, steps }
    }

    #[test]
    fn penniless_table() {
        let mut oracle = Oracle::new();
        let table = oracle.home_times(0);
        assert_entry(&table, Node::Cairo, 0.0, None);
        assert_entry(&table, Node::AddisAbeba, 3.361111, Some(Mode::Land));
        assert_eq!(table[Node::AddisAbeba].chain, chain(Node::Suakin, 3));
        assert_entry(&table, Node::GoldCoast, 5.905482, Some(Mode::Land));
        assert_eq!(table[Node::GoldCoast].chain, chain(Node::Tangier, 19));
        assert_entry(&table, Node::SierraLeone, 4.476469, Some(Mode::Land));
        assert_entry(&table, Node::Capetown, 9.047635, Some(Mode::Land));
        assert_eq!(table[Node::Capetown].chain, chain(Node::Cairo, 30));
        assert_entry(&table, Node::StHelena, 8.323694, Some(Mode::Sea));
        assert_eq!(table[Node::StHelena].chain, Chain::origin(Node::StHelena));
        assert_entry(&table, Node::CanaryIslands, 2.0, Some(Mode::Sea));
        assert_entry(&table, Node::Morocco, 1.166667, Some(Mode::Land));
        assert_entry(&table, Node::Suakin, 2.0, Some(Mode::Sea));
        assert_entry(&table, Node::DragonMountain, 6.761784, Some(Mode::Land));
        assert_entry(&table, Node::Crossroads1, 5.333194, Some(Mode::Land));
        assert_entry(&table, Node::Crossroads9, 9.904681, Some(Mode::Sea));
        assert_entry(&table, Node::Egypt, 1.587963, Some(Mode::Land));
        assert_eq!(table[Node::Egypt].chain, chain(Node::Cairo, 4));
    }

    #[test]
    fn one_sea_fare() {
        let mut oracle = Oracle::new();
        for money in [100, 200] {
            let table = oracle.home_times(money);
            assert_entry(&table, Node::AddisAbeba, 2.949074, Some(Mode::Land));
            assert_entry(&table, Node::Capetown, 8.486709, Some(Mode::Land));
            assert_eq!(table[Node::Capetown].chain, chain(Node::WhalefishBay, 4));
            assert_entry(&table, Node::StHelena, 6.647387, Some(Mode::Sea));
            assert_entry(&table, Node::CanaryIslands, 1.361111, Some(Mode::Sea));
            assert_entry(&table, Node::Suakin, 1.587963, Some(Mode::Sea));
            assert_entry(&table, Node::Crossroads9, 8.259857, Some(Mode::Sea));
        }
    }

    #[test]
    fn air_fare_unlocks_flights() {
        let mut oracle = Oracle::new();
        let table = oracle.home_times(300);
        assert_entry(&table, Node::GoldCoast, 2.166667, Some(Mode::Air));
        assert_entry(&table, Node::SierraLeone, 2.166667, Some(Mode::Air));
        assert_entry(&table, Node::Capetown, 5.760008, Some(Mode::Air));
        assert_entry(&table, Node::StHelena, 5.476469, Some(Mode::Air));
        assert_entry(&table, Node::Morocco, 1.0, Some(Mode::Air));
        assert_entry(&table, Node::Suakin, 1.0, Some(Mode::Air));
        assert_entry(&table, Node::DragonMountain, 4.612982, Some(Mode::Air));
        assert_entry(&table, Node::Crossroads1, 3.333333, Some(Mode::Land));
        assert_eq!(table[Node::Crossroads1].chain, chain(Node::GoldCoast, 2));
        assert_entry(&table, Node::Crossroads9, 6.926675, Some(Mode::Sea));
        assert_eq!(table[Node::Crossroads9].chain, chain(Node::Capetown, 2));
        assert_entry(&table, Node::Egypt, 1.587963, Some(Mode::Land));
        assert!((table[Node::AddisAbeba].turns - 2.361111).abs() < 1e-6);
    }

    #[test]
    fn more_money_never_slows_the_trip_home() {
        let mut oracle = Oracle::new();
        let mut previous = oracle.home_times(0);
        for home in [Node::Cairo, Node::Tangier] {
            assert_entry(&previous, home, 0.0, None);
        }
        for money in (100..=2000).step_by(100) {
            let table = oracle.home_times(money);
            for home in [Node::Cairo, Node::Tangier] {
                assert_entry(&table, home, 0.0, None);
            }
            for node in Node::ALL {
                assert!(table[node].turns <= previous[node].turns, "{node} at {money}");
                assert!(table[node].turns.is_finite());
            }
            previous = table;
        }
    }

    #[test]
    fn odd_amounts_round_down_to_whole_fares() {
        let mut oracle = Oracle::new();
        let exact = oracle.home_times(300);
        let odd = oracle.home_times(350);
        assert!(Arc::ptr_eq(&exact, &odd));
        assert_eq!(oracle.cache_sizes().0, 4);
    }

    #[test]
    fn mid_edge_positions_take_the_better_end() {
        let mut oracle = Oracle::new();
        let at_egypt = oracle.home_turns(0, &Position::At(Node::Egypt));
        assert!((at_egypt - 1.587963).abs() < 1e-6);
        // One step out of Cairo towards Egypt: e(1) from Cairo beats e(3 + 4) via Egypt.
        let near_cairo = Position::between(Node::Cairo, Node::Egypt, 1, 3);
        assert!((oracle.home_turns(0, &near_cairo) - 1.0).abs() < 1e-9);
    }
}
