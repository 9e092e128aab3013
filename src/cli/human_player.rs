use crate::board::{Node, Position};
use crate::cli::tui::TuiApp;
use crate::engine::{AIR_FARE, Oracle, SEA_FARE};
use crate::game::{FLIP_FEE, TurnReport};
use crate::players::{BasePlayer, TurnView};
use crate::types::Action;

/// Seat played from the terminal.
#[derive(Debug, Clone, Default)]
pub struct HumanPlayer {
    history: Vec<String>,
}

impl HumanPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a finished turn into the history pane.
    pub fn record(&mut self, report: &TurnReport) {
        self.history.push(format!("Turn {}: {report}", report.turn_no));
        self.history
            .extend(report.events.iter().map(|event| format!("    {event}")));
    }

    fn ask(&self, view: &TurnView<'_>, question: &str, choices: Vec<String>) -> usize {
        let mut app = TuiApp::new(*view, &self.history, question, choices);
        app.run().unwrap_or_else(|err| {
            log::error!("terminal prompt failed, taking the first option: {err}");
            0
        })
    }
}

impl BasePlayer for HumanPlayer {
    fn choose_action(
        &mut self,
        _oracle: &mut Oracle,
        view: &TurnView<'_>,
        options: &[Action],
    ) -> Action {
        let here = view.player.position.node();
        let labels = options
            .iter()
            .map(|&action| action_label(action, here, view.player.money))
            .collect();
        let index = self.ask(view, "Which option would you like?", labels);
        options.get(index).copied().unwrap_or(options[0])
    }

    fn choose_destination(
        &mut self,
        _oracle: &mut Oracle,
        view: &TurnView<'_>,
        options: &[Position],
    ) -> usize {
        let labels = options
            .iter()
            .map(|option| destination_label(option, view))
            .collect();
        self.ask(view, "Where would you like to travel?", labels)
    }

    fn accept_flip(&mut self, view: &TurnView<'_>) -> bool {
        let city = view
            .player
            .position
            .node()
            .map_or("this city", Node::full_name);
        let question = format!("Would you like to flip the token in {city}?");
        let choices = vec![format!("Yes, pay {FLIP_FEE} pounds"), "No".to_string()];
        self.ask(view, &question, choices) == 0
    }
}

pub fn action_label(action: Action, here: Option<Node>, money: u32) -> String {
    match action {
        Action::Flip => match here {
            Some(node) => format!("Try to flip the token in {}", node.full_name()),
            None => "Try to flip the token".to_string(),
        },
        Action::Land => "Travel by land".to_string(),
        Action::Sea if money == 0 => "Travel by sea, two steps a turn".to_string(),
        Action::Sea => format!("Travel by sea ({SEA_FARE} pounds)"),
        Action::Air => format!("Travel by plane ({AIR_FARE} pounds)"),
    }
}

pub fn destination_label(option: &Position, view: &TurnView<'_>) -> String {
    let description = option.describe(view.player.offshore, &view.unflipped);
    let others: Vec<&str> = view
        .players
        .iter()
        .filter(|player| player.seat != view.player.seat && player.position == *option)
        .map(|player| player.name.as_str())
        .collect();
    if others.is_empty() {
        description
    } else {
        format!("{description}, where {} is", others.join(" and "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::UnflippedSet;
    use crate::game::PlayerState;
    use crate::types::Archetype;

    #[test]
    fn action_labels_mention_fares() {
        assert_eq!(
            action_label(Action::Flip, Some(Node::Egypt), 300),
            "Try to flip the token in Egypt"
        );
        assert_eq!(action_label(Action::Sea, None, 300), "Travel by sea (100 pounds)");
        assert_eq!(action_label(Action::Sea, None, 0), "Travel by sea, two steps a turn");
        assert_eq!(action_label(Action::Air, None, 300), "Travel by plane (300 pounds)");
    }

    #[test]
    fn destination_labels_name_other_players_there() {
        let me = PlayerState::new(0, "Emma", Archetype::Human, Node::Cairo);
        let mut rival = PlayerState::new(1, "Felix", Archetype::TokenHunter, Node::Tangier);
        rival.position = Position::At(Node::Egypt);
        let players = [me.clone(), rival];
        let view = TurnView {
            player: &players[0],
            players: &players,
            unflipped: UnflippedSet::full(),
            star_found: false,
            turn_no: 3,
        };
        let label = destination_label(&Position::At(Node::Egypt), &view);
        assert!(label.starts_with("Egypt"), "{label}");
        assert!(label.ends_with(", where Felix is"), "{label}");
        let label = destination_label(&Position::At(Node::Tangier), &view);
        assert_eq!(label, "Tangier");
    }

    #[test]
    fn history_collects_reports_and_events() {
        let mut human = HumanPlayer::new();
        human.record(&TurnReport {
            turn_no: 2,
            seat: 0,
            player: "Emma".to_string(),
            money: 200,
            position: Position::At(Node::Egypt),
            description: "Egypt".to_string(),
            events: vec![crate::game::GameEvent::NothingFound],
        });
        assert_eq!(human.history, vec!["Turn 2: Emma, 200, Egy", "    Found nothing."]);
    }
}
