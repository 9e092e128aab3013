use crate::board::{Position, UnflippedSet};
use crate::engine::Oracle;
use crate::game::PlayerState;
use crate::types::Action;

/// Read-only snapshot handed to a controller when it has to decide something.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    pub player: &'a PlayerState,
    pub players: &'a [PlayerState],
    pub unflipped: UnflippedSet,
    pub star_found: bool,
    pub turn_no: u32,
}

/// Decides for one seat. The game only asks when there is a real choice.
pub trait BasePlayer {
    fn choose_action(
        &mut self,
        oracle: &mut Oracle,
        view: &TurnView<'_>,
        options: &[Action],
    ) -> Action;

    /// Index into `options` of the chosen destination.
    fn choose_destination(
        &mut self,
        oracle: &mut Oracle,
        view: &TurnView<'_>,
        options: &[Position],
    ) -> usize;

    /// Whether to pay 100 to turn over the token the player just landed on.
    fn accept_flip(&mut self, view: &TurnView<'_>) -> bool;
}
