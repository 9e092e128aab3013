use crate::board::Position;
use crate::engine::Oracle;
use crate::players::base::{BasePlayer, TurnView};
use crate::players::strategy::{
    choose_action_city, choose_action_token, choose_city, choose_home, choose_token,
};
use crate::types::Action;

/// Computer opponent driven by the seat's [`Archetype`](crate::types::Archetype).
///
/// A carrier runs home. Once the Star is out everybody hunts tokens; before
/// that, the racing archetypes head for their target city and the rest hunt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchetypePlayer;

impl BasePlayer for ArchetypePlayer {
    fn choose_action(
        &mut self,
        oracle: &mut Oracle,
        view: &TurnView<'_>,
        options: &[Action],
    ) -> Action {
        let player = view.player;
        let Some(node) = player.position.node() else {
            return options[0];
        };
        if player.is_carrying() {
            let fastest = oracle.home_times(player.money)[node].mode.map(Action::from);
            return fastest
                .filter(|action| options.contains(action))
                .or_else(|| options.iter().copied().find(|action| action.mode().is_some()))
                .unwrap_or(options[0]);
        }
        if view.star_found || player.archetype.target_city().is_none() {
            choose_action_token(oracle, options, node, view.unflipped, player.money)
        } else {
            choose_action_city(options)
        }
    }

    fn choose_destination(
        &mut self,
        oracle: &mut Oracle,
        view: &TurnView<'_>,
        options: &[Position],
    ) -> usize {
        let player = view.player;
        if player.is_carrying() {
            return choose_home(oracle, options, player.money);
        }
        match player.archetype.target_city() {
            Some(target) if !view.star_found => {
                choose_city(oracle, target, options, view.unflipped, player.money)
            }
            _ => choose_token(oracle, options, view.unflipped, player.money),
        }
    }

    fn accept_flip(&mut self, view: &TurnView<'_>) -> bool {
        !view.player.is_carrying()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Node, UnflippedSet};
    use crate::game::PlayerState;
    use crate::types::{Archetype, Mode};

    fn view_of<'a>(player: &'a PlayerState, star_found: bool) -> TurnView<'a> {
        TurnView {
            player,
            players: std::slice::from_ref(player),
            unflipped: UnflippedSet::full(),
            star_found,
            turn_no: 1,
        }
    }

    #[test]
    fn carriers_travel_the_way_home_is_fastest() {
        let mut oracle = Oracle::new();
        let mut player = PlayerState::new(0, "Amy", Archetype::CapeRunner, Node::Cairo);
        player.position = Position::At(Node::StHelena);
        player.money = 300;
        player.has_star = true;
        let options = [Action::Flip, Action::Sea, Action::Air];
        let expected = oracle.home_times(300)[Node::StHelena].mode;
        assert_eq!(expected, Some(Mode::Air));
        let choice = ArchetypePlayer.choose_action(&mut oracle, &view_of(&player, true), &options);
        assert_eq!(choice, Action::Air);
        assert!(!ArchetypePlayer.accept_flip(&view_of(&player, true)));
    }

    #[test]
    fn racers_flip_then_walk_until_the_star_is_found() {
        let mut oracle = Oracle::new();
        let mut player = PlayerState::new(0, "David", Archetype::GoldRunner, Node::Tangier);
        player.position = Position::At(Node::Suakin);
        let options = [Action::Land, Action::Sea];
        let view = view_of(&player, false);
        assert_eq!(ArchetypePlayer.choose_action(&mut oracle, &view, &options), Action::Land);
        assert!(ArchetypePlayer.accept_flip(&view));
    }

    #[test]
    fn racers_pick_their_target_city_when_reachable() {
        let mut oracle = Oracle::new();
        let player = PlayerState::new(0, "Connor", Archetype::CapeRunner, Node::Cairo);
        let options: Vec<Position> = ["Wha", "Tow", "nd9"]
            .iter()
            .map(|raw| raw.parse().unwrap())
            .collect();
        let view = view_of(&player, false);
        assert_eq!(ArchetypePlayer.choose_destination(&mut oracle, &view, &options), 1);
    }

    #[test]
    fn carriers_pick_the_destination_nearest_home() {
        let mut oracle = Oracle::new();
        let mut player = PlayerState::new(0, "Brook", Archetype::TokenHunter, Node::Tangier);
        player.has_horseshoe = true;
        player.money = 0;
        let options: Vec<Position> = ["Egy", "Darf", "Tri"]
            .iter()
            .map(|raw| raw.parse().unwrap())
            .collect();
        let view = view_of(&player, true);
        assert_eq!(ArchetypePlayer.choose_destination(&mut oracle, &view, &options), 0);
    }
}
