use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Node, UnflippedSet};

/// Where a piece stands: on a node, or part-way along the edge `from`-`to`.
///
/// The in-transit form keeps `from_steps + to_steps` equal to the edge weight,
/// with both counts positive. Its text form is `from-to-fromSteps-toSteps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    At(Node),
    Between {
        from: Node,
        to: Node,
        from_steps: u32,
        to_steps: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePositionError {
    #[error("unknown node {0:?}")]
    UnknownNode(String),
    #[error("invalid step count {0:?}")]
    InvalidSteps(String),
    #[error("expected 1 or 4 hyphen-separated fields, found {0}")]
    FieldCount(usize),
    #[error("no edge between {from} and {to}")]
    NoEdge { from: Node, to: Node },
    #[error("steps {from_steps}+{to_steps} do not match edge weight {weight}")]
    WeightMismatch {
        from_steps: u32,
        to_steps: u32,
        weight: u32,
    },
}

impl Position {
    /// In-transit position, collapsing onto the endpoint when a count is zero.
    pub fn between(from: Node, to: Node, from_steps: u32, to_steps: u32) -> Self {
        if from_steps == 0 {
            Position::At(from)
        } else if to_steps == 0 {
            Position::At(to)
        } else {
            Position::Between {
                from,
                to,
                from_steps,
                to_steps,
            }
        }
    }

    pub fn node(&self) -> Option<Node> {
        match self {
            Position::At(node) => Some(*node),
            Position::Between { .. } => None,
        }
    }

    /// Standing in a named place rather than at a crossroads or in transit.
    pub fn city(&self) -> Option<Node> {
        self.node().filter(|node| !node.is_crossroads())
    }

    /// Every place reachable by walking exactly `steps` along land edges, or
    /// along sea edges when `offshore`.
    ///
    /// Land travel may pass through any node; sea travel passes through sea
    /// crossroads but ends at the first harbour. A path never doubles back
    /// along the edge it just arrived on. Duplicates are kept.
    pub fn destination_options(&self, steps: u32, offshore: bool) -> Vec<Position> {
        let mut options = Vec::new();
        match *self {
            Position::At(node) => walk_from(node, steps, offshore, None, &mut options),
            Position::Between {
                from,
                to,
                from_steps,
                to_steps,
            } => {
                if from_steps > steps {
                    options.push(Position::Between {
                        from,
                        to,
                        from_steps: from_steps - steps,
                        to_steps: to_steps + steps,
                    });
                } else {
                    arrive(from, to, steps - from_steps, offshore, &mut options);
                }
                if to_steps > steps {
                    options.push(Position::Between {
                        from,
                        to,
                        from_steps: from_steps + steps,
                        to_steps: to_steps - steps,
                    });
                } else {
                    arrive(to, from, steps - to_steps, offshore, &mut options);
                }
            }
        }
        options
    }

    /// Human-readable description for reports.
    pub fn describe(&self, offshore: bool, unflipped: &UnflippedSet) -> String {
        match *self {
            Position::At(node) if node.is_home() => node.full_name().to_string(),
            Position::At(node) if node.is_crossroads() => node.full_name().to_string(),
            Position::At(node) => {
                let state = if unflipped.contains(node) {
                    "the token has not yet been flipped"
                } else {
                    "the token is already flipped"
                };
                format!("{} ({state})", node.full_name())
            }
            Position::Between {
                from,
                to,
                from_steps,
                to_steps,
            } => {
                let by_sea = if offshore { " by sea" } else { "" };
                let (crossroads, other, steps) = if from.is_crossroads() {
                    (from, to, to_steps)
                } else if to.is_crossroads() {
                    (to, from, from_steps)
                } else {
                    return format!(
                        "{to_steps} step(s) to {}, {from_steps} step(s) to {}{by_sea}",
                        to.full_name(),
                        from.full_name()
                    );
                };
                format!(
                    "{steps} step(s) {} of {}{by_sea}",
                    heading(crossroads, other),
                    other.full_name()
                )
            }
        }
    }
}

/// Lands on `node` with `remaining` steps still to walk, having come from `came_from`.
fn arrive(node: Node, came_from: Node, remaining: u32, offshore: bool, out: &mut Vec<Position>) {
    if remaining == 0 {
        out.push(Position::At(node));
        return;
    }
    if !node.is_crossroads() {
        out.push(Position::At(node));
    }
    if !offshore || node.is_crossroads() {
        walk_from(node, remaining, offshore, Some(came_from), out);
    }
}

fn walk_from(node: Node, steps: u32, offshore: bool, ignore: Option<Node>, out: &mut Vec<Position>) {
    let routes = if offshore {
        node.sea_routes()
    } else {
        node.land_routes()
    };
    for &(next, weight) in routes.iter().filter(|(next, _)| Some(*next) != ignore) {
        if weight > steps {
            out.push(Position::Between {
                from: node,
                to: next,
                from_steps: steps,
                to_steps: weight - steps,
            });
        } else {
            arrive(next, node, steps - weight, offshore, out);
        }
    }
}

/// Compass heading of `other` as seen from the crossroads.
fn heading(crossroads: Node, other: Node) -> &'static str {
    use Node::*;
    match (crossroads, other) {
        (Crossroads0, _) => "northwest",
        (Crossroads1, GoldCoast) => "north",
        (Crossroads1, SierraLeone) => "east",
        (Crossroads1, _) => "southwest",
        (Crossroads2, AinGalaka) => "south",
        (Crossroads2, DarFur) => "west",
        (Crossroads2, Kandjama) => "north",
        (Crossroads2, _) => "east",
        (Crossroads3, LakeVictoria) => "southeast",
        (Crossroads3, _) => "north",
        (Crossroads4, Congo) => "southeast",
        (Crossroads4, _) => "southwest",
        (Crossroads5, _) => "northeast",
        (Crossroads6, Tunis) => "east",
        (Crossroads6, _) => "west",
        (Crossroads7, SierraLeone) => "northwest",
        (Crossroads7, _) => "north",
        (Crossroads8, GoldCoast) => "southeast",
        (Crossroads8, _) => "northwest",
        (Crossroads9, WhalefishBay) => "southwest",
        (Crossroads9, Capetown) => "northwest",
        (Crossroads9, _) => "southeast",
        _ => "away",
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::At(node) => write!(f, "{node}"),
            Position::Between {
                from,
                to,
                from_steps,
                to_steps,
            } => write!(f, "{from}-{to}-{from_steps}-{to_steps}"),
        }
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('-').collect();
        let node = |raw: &str| {
            Node::from_str(raw).map_err(|_| ParsePositionError::UnknownNode(raw.to_string()))
        };
        let count = |raw: &str| {
            raw.parse::<u32>()
                .map_err(|_| ParsePositionError::InvalidSteps(raw.to_string()))
        };
        match fields.as_slice() {
            [single] => Ok(Position::At(node(single)?)),
            [from, to, from_steps, to_steps] => {
                let (from, to) = (node(from)?, node(to)?);
                let (from_steps, to_steps) = (count(from_steps)?, count(to_steps)?);
                let mut weights = from.edge_weights(to).peekable();
                let weight = *weights
                    .peek()
                    .ok_or(ParsePositionError::NoEdge { from, to })?;
                if !weights.any(|w| w == from_steps + to_steps) {
                    return Err(ParsePositionError::WeightMismatch {
                        from_steps,
                        to_steps,
                        weight,
                    });
                }
                Ok(Position::between(from, to, from_steps, to_steps))
            }
            other => Err(ParsePositionError::FieldCount(other.len())),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Position::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(raw: &str) -> Position {
        raw.parse().unwrap()
    }

    fn encoded(options: &[Position]) -> Vec<String> {
        options.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn text_form_matches_hyphenated_encoding() {
        let p = Position::between(Node::Cairo, Node::Egypt, 1, 3);
        assert_eq!(p.to_string(), "Cai-Egy-1-3");
        assert_eq!(pos("Cai-Egy-1-3"), p);
        assert_eq!(pos("nd0-Sah-3-1").to_string(), "nd0-Sah-3-1");
        assert_eq!(pos("Tow"), Position::At(Node::Capetown));
    }

    #[test]
    fn tangier_tunis_accepts_both_land_and_sea_counts() {
        let by_sea = Position::At(Node::Tangier).destination_options(1, true);
        assert!(encoded(&by_sea).contains(&"Tan-Tun-1-2".to_string()));
        assert_eq!(pos("Tan-Tun-1-2").to_string(), "Tan-Tun-1-2");
        assert_eq!(pos("Tun-Tan-2-1").to_string(), "Tun-Tan-2-1");
        assert_eq!(pos("Tan-Tun-1-4").to_string(), "Tan-Tun-1-4");
        assert!(matches!(
            "Tan-Tun-2-2".parse::<Position>(),
            Err(ParsePositionError::WeightMismatch { weight: 5, .. })
        ));

        let json = serde_json::to_string(&pos("Tan-Tun-1-2")).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos("Tan-Tun-1-2"));
    }

    #[test]
    fn zero_step_counts_collapse_onto_the_endpoint() {
        assert_eq!(
            Position::between(Node::Cairo, Node::Egypt, 0, 4),
            Position::At(Node::Cairo)
        );
        assert_eq!(pos("Cai-Egy-4-0"), Position::At(Node::Egypt));
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(
            "Cai-Egy-1".parse::<Position>(),
            Err(ParsePositionError::FieldCount(3))
        ));
        assert!(matches!(
            "Cai-Egy-2-3".parse::<Position>(),
            Err(ParsePositionError::WeightMismatch { weight: 4, .. })
        ));
        assert!(matches!(
            "Cai-Tan-1-1".parse::<Position>(),
            Err(ParsePositionError::NoEdge { .. })
        ));
        assert!(matches!(
            "Cai-Egy-x-3".parse::<Position>(),
            Err(ParsePositionError::InvalidSteps(_))
        ));
        assert!(matches!(
            "Xyz".parse::<Position>(),
            Err(ParsePositionError::UnknownNode(_))
        ));
    }

    #[test]
    fn land_moves_chain_through_cities_and_crossroads() {
        let options = pos("Lak").destination_options(6, false);
        assert_eq!(
            encoded(&options),
            vec![
                "Add",
                "Gua",
                "Sua",
                "Bah",
                "Darf",
                "Darf-Ain-2-2",
                "Darf-Egy-2-1",
                "Darf-Sah-2-6",
                "Darf-Sua-2-2",
                "Darf-nd2-2-2",
                "Oco",
                "Oco-Con-2-2",
                "Dare",
                "Dare-Gua-1-5",
                "Moz",
            ]
        );
    }

    #[test]
    fn crossroads_are_passed_through_but_not_offered() {
        let options = pos("nd4").destination_options(3, false);
        assert_eq!(
            encoded(&options),
            vec!["nd4-Con-3-5", "Moz", "Moz-nd3-1-1", "Dra", "Vic"]
        );
    }

    #[test]
    fn in_transit_moves_go_both_ways_without_doubling_back() {
        let options = pos("Cai-Egy-1-3").destination_options(2, false);
        assert_eq!(encoded(&options), vec!["Cai", "Cai-Egy-3-1"]);
    }

    #[test]
    fn sea_moves_stop_at_harbours_but_cross_sea_crossroads() {
        let options = pos("Ver").destination_options(3, true);
        assert_eq!(encoded(&options), vec!["Ver-Can-3-2", "Sie", "nd7-Sth-2-7"]);

        let slow = pos("Can-Ver-2-3").destination_options(2, true);
        assert_eq!(encoded(&slow), vec!["Can", "Can-Ver-4-1"]);
    }

    #[test]
    fn descriptions_mention_token_state_and_direction() {
        let unflipped = UnflippedSet::full();
        assert_eq!(
            pos("Egy").describe(false, &unflipped),
            "Egypt (the token has not yet been flipped)"
        );
        assert_eq!(pos("Cai").describe(false, &unflipped), "Cairo");
        assert_eq!(
            pos("Cai-Egy-1-3").describe(false, &unflipped),
            "3 step(s) to Egypt, 1 step(s) to Cairo"
        );
        assert_eq!(
            pos("nd1-Gol-1-1").describe(false, &unflipped),
            "1 step(s) north of Gold Coast"
        );
        assert_eq!(
            pos("Sth-nd9-1-7").describe(true, &unflipped),
            "1 step(s) southeast of St. Helena by sea"
        );
    }
}
