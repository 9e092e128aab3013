use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};

use crate::types::Mode;

mod position;
mod routes;
pub mod tokens;

pub use position::{ParsePositionError, Position};
pub use tokens::{TokenBoard, TokenKind, UnflippedSet};

pub const NODE_COUNT: usize = 42;
/// Nodes `0..TOKEN_NODE_COUNT` each hold one face-down token at game start.
pub const TOKEN_NODE_COUNT: usize = 30;
pub const HOME_CITIES: [Node; 2] = [Node::Cairo, Node::Tangier];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, Display, EnumIter,
)]
#[repr(u8)]
pub enum Node {
    #[strum(serialize = "Add")]
    AddisAbeba,
    #[strum(serialize = "Ain")]
    AinGalaka,
    #[strum(serialize = "Bah")]
    BahrElGhasal,
    #[strum(serialize = "Can")]
    CanaryIslands,
    #[strum(serialize = "Con")]
    Congo,
    #[strum(serialize = "Dare")]
    Daressalam,
    #[strum(serialize = "Darf")]
    DarFur,
    #[strum(serialize = "Dra")]
    DragonMountain,
    #[strum(serialize = "Egy")]
    Egypt,
    #[strum(serialize = "Gol")]
    GoldCoast,
    #[strum(serialize = "Gua")]
    CapeGuardafui,
    #[strum(serialize = "Kan")]
    Kandjama,
    #[strum(serialize = "Lak")]
    LakeVictoria,
    #[strum(serialize = "Mor")]
    Morocco,
    #[strum(serialize = "Moz")]
    Mozambique,
    #[strum(serialize = "Oco")]
    Ocomba,
    #[strum(serialize = "Sah")]
    Sahara,
    #[strum(serialize = "Sie")]
    SierraLeone,
    #[strum(serialize = "Sla")]
    SlaveCoast,
    #[strum(serialize = "Sth")]
    StHelena,
    #[strum(serialize = "Stm")]
    CapeStMarie,
    #[strum(serialize = "Sua")]
    Suakin,
    #[strum(serialize = "Tam")]
    Tamatave,
    #[strum(serialize = "Tim")]
    Timbuktu,
    #[strum(serialize = "Tow")]
    Capetown,
    #[strum(serialize = "Tri")]
    Tripoli,
    #[strum(serialize = "Tun")]
    Tunis,
    #[strum(serialize = "Ver")]
    CapeVerde,
    #[strum(serialize = "Vic")]
    VictoriaFalls,
    #[strum(serialize = "Wha")]
    WhalefishBay,
    #[strum(serialize = "Cai")]
    Cairo,
    #[strum(serialize = "Tan")]
    Tangier,
    #[strum(serialize = "nd0")]
    Crossroads0,
    #[strum(serialize = "nd1")]
    Crossroads1,
    #[strum(serialize = "nd2")]
    Crossroads2,
    #[strum(serialize = "nd3")]
    Crossroads3,
    #[strum(serialize = "nd4")]
    Crossroads4,
    #[strum(serialize = "nd5")]
    Crossroads5,
    #[strum(serialize = "nd6")]
    Crossroads6,
    #[strum(serialize = "nd7")]
    Crossroads7,
    #[strum(serialize = "nd8")]
    Crossroads8,
    #[strum(serialize = "nd9")]
    Crossroads9,
}

impl Node {
    pub const ALL: [Node; NODE_COUNT] = [
        Node::AddisAbeba,
        Node::AinGalaka,
        Node::BahrElGhasal,
        Node::CanaryIslands,
        Node::Congo,
        Node::Daressalam,
        Node::DarFur,
        Node::DragonMountain,
        Node::Egypt,
        Node::GoldCoast,
        Node::CapeGuardafui,
        Node::Kandjama,
        Node::LakeVictoria,
        Node::Morocco,
        Node::Mozambique,
        Node::Ocomba,
        Node::Sahara,
        Node::SierraLeone,
        Node::SlaveCoast,
        Node::StHelena,
        Node::CapeStMarie,
        Node::Suakin,
        Node::Tamatave,
        Node::Timbuktu,
        Node::Capetown,
        Node::Tripoli,
        Node::Tunis,
        Node::CapeVerde,
        Node::VictoriaFalls,
        Node::WhalefishBay,
        Node::Cairo,
        Node::Tangier,
        Node::Crossroads0,
        Node::Crossroads1,
        Node::Crossroads2,
        Node::Crossroads3,
        Node::Crossroads4,
        Node::Crossroads5,
        Node::Crossroads6,
        Node::Crossroads7,
        Node::Crossroads8,
        Node::Crossroads9,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Node {
        Node::ALL[index]
    }

    pub fn is_crossroads(self) -> bool {
        self.index() >= Node::Crossroads0.index()
    }

    pub fn is_home(self) -> bool {
        matches!(self, Node::Cairo | Node::Tangier)
    }

    pub fn holds_token(self) -> bool {
        self.index() < TOKEN_NODE_COUNT
    }

    pub fn land_routes(self) -> &'static [(Node, u32)] {
        routes::land(self)
    }

    pub fn sea_routes(self) -> &'static [(Node, u32)] {
        routes::sea(self)
    }

    pub fn air_routes(self) -> &'static [Node] {
        routes::air(self)
    }

    /// Weighted neighbours reachable by stepping along land or sea edges.
    pub fn routes(self, mode: Mode) -> &'static [(Node, u32)] {
        match mode {
            Mode::Land => self.land_routes(),
            Mode::Sea => self.sea_routes(),
            Mode::Air => &[],
        }
    }

    /// Weights of the edges joining `self` and `other`, land first.
    ///
    /// Tangier and Tunis are joined both by land and by sea, so a pair can
    /// carry two different weights.
    pub fn edge_weights(self, other: Node) -> impl Iterator<Item = u32> {
        self.land_routes()
            .iter()
            .chain(self.sea_routes())
            .filter(move |(next, _)| *next == other)
            .map(|(_, weight)| *weight)
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Node::AddisAbeba => "Addis Abeba",
            Node::AinGalaka => "Ain-Galaka",
            Node::BahrElGhasal => "Bahr El Ghasal",
            Node::CanaryIslands => "Canary Islands",
            Node::Congo => "Congo",
            Node::Daressalam => "Daressalam",
            Node::DarFur => "Dar-Fur",
            Node::DragonMountain => "Dragon Mountain",
            Node::Egypt => "Egypt",
            Node::GoldCoast => "Gold Coast",
            Node::CapeGuardafui => "Cape Guardafui",
            Node::Kandjama => "Kandjama",
            Node::LakeVictoria => "Lake Victoria",
            Node::Morocco => "Morocco",
            Node::Mozambique => "Mozambique",
            Node::Ocomba => "Ocomba",
            Node::Sahara => "Sahara",
            Node::SierraLeone => "Sierra Leone",
            Node::SlaveCoast => "Slave Coast",
            Node::StHelena => "St. Helena",
            Node::CapeStMarie => "Cape St. Marie",
            Node::Suakin => "Suakin",
            Node::Tamatave => "Tamatave",
            Node::Timbuktu => "Timbuktu",
            Node::Capetown => "Capetown",
            Node::Tripoli => "Tripoli",
            Node::Tunis => "Tunis",
            Node::CapeVerde => "Cape Verde",
            Node::VictoriaFalls => "Victoria Falls",
            Node::WhalefishBay => "Whalefish Bay",
            Node::Cairo => "Cairo",
            Node::Tangier => "Tangier",
            Node::Crossroads0 => "the crossroads between Tangier and Morocco",
            Node::Crossroads1 => "the crossroads between Sierra Leone, Gold Coast and Timbuktu",
            Node::Crossroads2 => {
                "the crossroads between Ain-Galaka, Dar-Fur, Kandjama and Slave Coast"
            }
            Node::Crossroads3 => "the crossroads between Lake Victoria, Daressalam and Mozambique",
            Node::Crossroads4 => {
                "the northeastern crossroads between Mozambique, Dragon Mountain and Victoria Falls"
            }
            Node::Crossroads5 => {
                "the southwestern crossroads between Mozambique, Dragon Mountain and Victoria Falls"
            }
            Node::Crossroads6 => "the crossroads between Tunis, Tripoli and Cairo on the sea",
            Node::Crossroads7 => {
                "the crossroads between Cape Verde, Sierra Leone and St. Helena on the sea"
            }
            Node::Crossroads8 => {
                "the crossroads between Gold Coast, Slave Coast and Congo on the sea"
            }
            Node::Crossroads9 => {
                "the crossroads between St. Helena, Whalefish Bay and Capetown on the sea"
            }
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Node::from_str(&raw).map_err(serde::de::Error::custom)
    }
}
