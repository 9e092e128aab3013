use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::board::Node;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Land,
    Sea,
    Air,
}

/// One of the four things a free player may do on their turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Flip,
    Land,
    Sea,
    Air,
}

impl Action {
    pub fn mode(self) -> Option<Mode> {
        match self {
            Action::Flip => None,
            Action::Land => Some(Mode::Land),
            Action::Sea => Some(Mode::Sea),
            Action::Air => Some(Mode::Air),
        }
    }
}

impl From<Mode> for Action {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Land => Action::Land,
            Mode::Sea => Action::Sea,
            Mode::Air => Action::Air,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Archetype {
    Human,
    /// Always heads for the nearest unflipped token.
    TokenHunter,
    /// Races for the first-arrival bonus at Capetown, then hunts tokens.
    CapeRunner,
    /// Races for the doubled payouts at Gold Coast, then hunts tokens.
    GoldRunner,
}

impl Archetype {
    pub fn is_ai(self) -> bool {
        !matches!(self, Archetype::Human)
    }

    pub fn target_city(self) -> Option<Node> {
        match self {
            Archetype::CapeRunner => Some(Node::Capetown),
            Archetype::GoldRunner => Some(Node::GoldCoast),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SpecialStatus {
    #[default]
    Free,
    /// Penniless at sea: two fixed steps per turn until the next harbour.
    ForcedSlowSea,
    Ambushed,
    Captured,
    /// Turns of forced labour left, counting down from three.
    Enslaved(u8),
}
