//! Scoring rules shared by the computer archetypes.
//!
//! Every rule is a pure function of the options offered, the traveller's money
//! and the face-down tokens; the [`Oracle`] only memoises engine tables.
//! Ties always resolve to the earliest option.

use itertools::Itertools;

use crate::board::{Node, Position, UnflippedSet};
use crate::engine::{Oracle, SEA_FARE, cmp_distances, shortest_distances};
use crate::types::Action;

/// Land probes whose nearest token is closer than this make the sea
/// comparison assume the fare will be paid.
const NEAR_TOKEN: f64 = 13.0;

/// Surcharge in steps for spending scarce money on a ferry.
pub fn sea_surcharge(money: u32) -> f64 {
    match money {
        100 => 7.0,
        200 => 4.0,
        300 => 1.0,
        _ => 0.0,
    }
}

/// Surcharge in steps for spending money on a flight.
pub fn air_surcharge(money: u32) -> f64 {
    match money {
        300 => 10.0,
        400 => 6.0,
        500 => 4.0,
        m if m < 800 => 2.0,
        _ => 0.0,
    }
}

/// Destination with the fewest expected turns to Cairo or Tangier.
pub fn choose_home(oracle: &mut Oracle, options: &[Position], money: u32) -> usize {
    let turns: Vec<f64> = options
        .iter()
        .map(|option| oracle.home_turns(money, option))
        .collect();
    argmin(&turns)
}

/// Destination closest to the face-down tokens.
pub fn choose_token(
    oracle: &mut Oracle,
    options: &[Position],
    unflipped: UnflippedSet,
    money: u32,
) -> usize {
    let table = oracle.token_distances(unflipped, money == 0);
    options
        .iter()
        .map(|option| table.from_position(option))
        .position_min_by(|a, b| cmp_distances(a, b))
        .unwrap_or(0)
}

/// Travel mode that brings a token hunter closest to a face-down token.
///
/// Each mode is scored by its best first step: one square along every land
/// or sea route, or straight to every airport. Ferries and flights carry a
/// surcharge unless the player can afford them comfortably. When a land
/// route already reaches a close token and the ferry would beat it by
/// exactly two steps, the ferry surcharge is waived so the hunter does not
/// stall on the coast.
pub fn choose_action_token(
    oracle: &mut Oracle,
    options: &[Action],
    node: Node,
    unflipped: UnflippedSet,
    money: u32,
) -> Action {
    if options.contains(&Action::Flip) {
        return Action::Flip;
    }
    let poor = money == 0;
    let table = oracle.token_distances(unflipped, poor);
    let mut land_nearest: Option<f64> = None;
    let mut scores: Vec<Vec<f64>> = Vec::with_capacity(options.len());

    for (index, action) in options.iter().enumerate() {
        let score = match action {
            Action::Land => {
                let steps = node.land_routes().iter().map(|&(next, weight)| {
                    table.from_position(&first_step(node, next, weight))
                });
                let best = best_of(steps);
                if index == 0 {
                    land_nearest = best.first().copied();
                }
                best
            }
            Action::Sea => {
                let careful = land_nearest.filter(|nearest| *nearest < NEAR_TOKEN);
                let probe = if careful.is_some() {
                    oracle.token_distances(unflipped, false)
                } else {
                    table.clone()
                };
                best_of(node.sea_routes().iter().map(|&(next, weight)| {
                    let mut tester = probe.from_position(&first_step(node, next, weight));
                    let stalls = careful
                        .is_some_and(|nearest| tester.first() == Some(&(nearest - 2.0)));
                    if !stalls {
                        surcharge(&mut tester, sea_surcharge(money));
                    }
                    tester
                }))
            }
            Action::Air => {
                let flights = oracle.token_distances(unflipped, money == 300);
                best_of(node.air_routes().iter().map(|&next| {
                    let mut tester = flights.at(next).to_vec();
                    surcharge(&mut tester, air_surcharge(money));
                    tester
                }))
            }
            Action::Flip => Vec::new(),
        };
        scores.push(score);
    }

    scores
        .iter()
        .position_min_by(|a, b| cmp_distances(a, b))
        .map_or(options[0], |index| options[index])
}

/// A racing archetype flips whenever it can and otherwise walks.
pub fn choose_action_city(options: &[Action]) -> Action {
    [Action::Flip, Action::Land]
        .into_iter()
        .find(|action| options.contains(action))
        .unwrap_or(options[0])
}

/// Destination for an archetype racing towards `target`.
///
/// Arriving at Gold Coast or Capetown wins outright. Otherwise a single
/// reachable face-down city is taken; several are ranked by how quickly the
/// player could get home from them after paying the flip; with none, the
/// option nearest the target is taken.
pub fn choose_city(
    oracle: &mut Oracle,
    target: Node,
    options: &[Position],
    unflipped: UnflippedSet,
    money: u32,
) -> usize {
    for city in [Node::GoldCoast, Node::Capetown] {
        if let Some(index) = options.iter().position(|option| *option == Position::At(city)) {
            return index;
        }
    }

    let face_down =
        |option: &Position| option.node().is_some_and(|node| unflipped.contains(node));
    let candidates: Vec<usize> = options.iter().positions(face_down).collect();

    let scores: Vec<f64> = match candidates.as_slice() {
        [only] => return *only,
        [] => {
            let dist = shortest_distances(target, false);
            options
                .iter()
                .map(|option| match *option {
                    Position::At(node) => dist[node.index()],
                    Position::Between {
                        from,
                        to,
                        from_steps,
                        to_steps,
                    } => (dist[from.index()] + f64::from(from_steps))
                        .min(dist[to.index()] + f64::from(to_steps)),
                })
                .collect()
        }
        _ => {
            let table = oracle.home_times(money.saturating_sub(SEA_FARE));
            options
                .iter()
                .map(|option| match option.node() {
                    Some(node) if face_down(option) => table[node].turns,
                    _ => f64::INFINITY,
                })
                .collect()
        }
    };
    argmin(&scores)
}

/// One square along the edge, kept unnormalised so a one-step edge still
/// scores both of its ends.
fn first_step(node: Node, next: Node, weight: u32) -> Position {
    Position::Between {
        from: node,
        to: next,
        from_steps: 1,
        to_steps: weight - 1,
    }
}

fn best_of(candidates: impl Iterator<Item = Vec<f64>>) -> Vec<f64> {
    candidates
        .min_by(|a, b| cmp_distances(a, b))
        .unwrap_or_default()
}

fn surcharge(distances: &mut [f64], steps: f64) {
    for distance in distances {
        *distance += steps;
    }
}

fn argmin(values: &[f64]) -> usize {
    values
        .iter()
        .position_min_by(|a, b| a.total_cmp(b))
        .unwrap_or(0)
}
