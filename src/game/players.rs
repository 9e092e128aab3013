use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Node, Position, UnflippedSet};
use crate::engine::AIR_FARE;
use crate::types::{Action, Archetype, SpecialStatus};

pub const STARTING_MONEY: u32 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Index into the original seating, stable across eliminations.
    pub seat: usize,
    pub name: String,
    pub archetype: Archetype,
    pub position: Position,
    pub money: u32,
    pub has_star: bool,
    pub has_horseshoe: bool,
    pub offshore: bool,
    pub status: SpecialStatus,
}

impl PlayerState {
    pub fn new(seat: usize, name: impl Into<String>, archetype: Archetype, home: Node) -> Self {
        Self {
            seat,
            name: name.into(),
            archetype,
            position: Position::At(home),
            money: STARTING_MONEY,
            has_star: false,
            has_horseshoe: false,
            offshore: false,
            status: SpecialStatus::Free,
        }
    }

    /// Holding something that wins the game once brought home.
    pub fn is_carrying(&self) -> bool {
        self.has_star || self.has_horseshoe
    }

    pub fn has_won(&self) -> bool {
        self.is_carrying() && self.position.node().is_some_and(Node::is_home)
    }

    /// Actions open to a free player this turn.
    ///
    /// In a city: flip when the token there is face down, then each travel
    /// mode the city has routes for (flying needs the fare). Anywhere else
    /// the player keeps going the way they were travelling.
    pub fn turn_possibilities(&self, unflipped: &UnflippedSet) -> SmallVec<[Action; 4]> {
        let mut possible = SmallVec::new();
        match self.position.city() {
            Some(city) => {
                if unflipped.contains(city) {
                    possible.push(Action::Flip);
                }
                if !city.land_routes().is_empty() {
                    possible.push(Action::Land);
                }
                if !city.sea_routes().is_empty() {
                    possible.push(Action::Sea);
                }
                if !city.air_routes().is_empty() && self.money >= AIR_FARE {
                    possible.push(Action::Air);
                }
            }
            None if self.offshore => possible.push(Action::Sea),
            None => possible.push(Action::Land),
        }
        possible
    }

    pub fn destination_options(&self, steps: u32) -> Vec<Position> {
        self.position.destination_options(steps, self.offshore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(position: &str, money: u32) -> PlayerState {
        let mut player = PlayerState::new(0, "Amy", Archetype::TokenHunter, Node::Cairo);
        player.position = position.parse().unwrap();
        player.money = money;
        player
    }

    #[test]
    fn starts_at_home_with_three_hundred() {
        let player = PlayerState::new(2, "Connor", Archetype::CapeRunner, Node::Tangier);
        assert_eq!(player.position, Position::At(Node::Tangier));
        assert_eq!(player.money, STARTING_MONEY);
        assert_eq!(player.status, SpecialStatus::Free);
        assert!(!player.is_carrying());
    }

    #[test]
    fn home_city_offers_every_mode_with_the_air_fare() {
        let player = player_at("Cai", 300);
        let options = player.turn_possibilities(&UnflippedSet::full());
        assert_eq!(options.as_slice(), &[Action::Land, Action::Sea, Action::Air]);

        let broke = player_at("Cai", 200);
        let options = broke.turn_possibilities(&UnflippedSet::full());
        assert_eq!(options.as_slice(), &[Action::Land, Action::Sea]);
    }

    #[test]
    fn face_down_token_offers_a_flip() {
        let player = player_at("Can", 0);
        let options = player.turn_possibilities(&UnflippedSet::full());
        assert_eq!(options.as_slice(), &[Action::Flip, Action::Sea]);

        let options = player.turn_possibilities(&UnflippedSet::empty());
        assert_eq!(options.as_slice(), &[Action::Sea]);
    }

    #[test]
    fn travellers_keep_their_mode_between_cities() {
        let mut player = player_at("Cai-Egy-1-3", 300);
        assert_eq!(
            player.turn_possibilities(&UnflippedSet::full()).as_slice(),
            &[Action::Land]
        );
        player.position = "nd7".parse().unwrap();
        player.offshore = true;
        assert_eq!(
            player.turn_possibilities(&UnflippedSet::full()).as_slice(),
            &[Action::Sea]
        );
    }

    #[test]
    fn winning_needs_a_prize_at_a_home_city() {
        let mut player = player_at("Egy", 0);
        player.has_horseshoe = true;
        assert!(!player.has_won());
        player.position = Position::At(Node::Cairo);
        assert!(player.has_won());
    }
}
