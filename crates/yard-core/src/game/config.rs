use crate::graph::TransportGraph;
use crate::model::node::Node;
use crate::model::reveal::RevealSchedule;
use crate::model::ticket::TicketBook;
use crate::rules;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything needed to set up one game. Built once by the caller and passed
/// by reference; the core never reads settings on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub evader_tickets: TicketBook,
    pub seeker_tickets: TicketBook,
    pub evader_start: StartPosition,
    pub seeker_starts: Vec<StartPosition>,
    #[serde(default)]
    pub reveal_moves: RevealSchedule,
    pub max_moves: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StartRepr", into = "StartRepr")]
pub enum StartPosition {
    Random,
    Fixed(Node),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum StartRepr {
    Node(u16),
    Keyword(String),
}

impl TryFrom<StartRepr> for StartPosition {
    type Error = String;

    fn try_from(repr: StartRepr) -> Result<Self, Self::Error> {
        match repr {
            StartRepr::Node(id) => Node::new(id)
                .map(StartPosition::Fixed)
                .ok_or_else(|| "start node must be positive".to_string()),
            StartRepr::Keyword(word) if word.trim().eq_ignore_ascii_case("random") => {
                Ok(StartPosition::Random)
            }
            StartRepr::Keyword(word) => Err(format!(
                "start position must be a node number or `random`, got `{word}`"
            )),
        }
    }
}

impl From<StartPosition> for StartRepr {
    fn from(start: StartPosition) -> Self {
        match start {
            StartPosition::Random => StartRepr::Keyword("random".to_string()),
            StartPosition::Fixed(node) => StartRepr::Node(node.get()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("at least one seeker is required")]
    NoSeekers,
    #[error("max_moves must be greater than zero")]
    ZeroMoveLimit,
    #[error("reveal move numbers start at 1")]
    ZeroReveal,
    #[error("participant {participant} starts on node {node}, which has no station")]
    NotAStation { participant: usize, node: Node },
    #[error("participants {first} and {second} both start on node {node}")]
    Collision {
        first: usize,
        second: usize,
        node: Node,
    },
    #[error("no free station left for participant {participant}")]
    NoFreeStation { participant: usize },
    #[error("participant listed at position {position} has index {index}")]
    ParticipantIndex { position: usize, index: usize },
}

impl GameConfig {
    pub fn seeker_count(&self) -> usize {
        self.seeker_starts.len()
    }

    /// Checks the values that do not depend on the map.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.seeker_starts.is_empty() {
            return Err(SetupError::NoSeekers);
        }
        if self.max_moves == 0 {
            return Err(SetupError::ZeroMoveLimit);
        }
        if self.reveal_moves.contains(0) {
            return Err(SetupError::ZeroReveal);
        }
        Ok(())
    }

    fn starts(&self) -> impl Iterator<Item = StartPosition> + '_ {
        std::iter::once(self.evader_start).chain(self.seeker_starts.iter().copied())
    }

    /// Resolves every start position, index 0 being the evader.
    ///
    /// Fixed positions are placed first and must be distinct stations; random
    /// ones are then drawn among the stations still free.
    pub fn resolve_positions<R: Rng + ?Sized>(
        &self,
        graph: &TransportGraph,
        rng: &mut R,
    ) -> Result<Vec<Node>, SetupError> {
        self.validate()?;

        let mut occupied: Vec<Node> = Vec::new();
        let mut owners: Vec<usize> = Vec::new();
        for (participant, start) in self.starts().enumerate() {
            let StartPosition::Fixed(node) = start else {
                continue;
            };
            if !graph.is_station(node) {
                return Err(SetupError::NotAStation { participant, node });
            }
            if let Some(slot) = occupied.iter().position(|taken| *taken == node) {
                return Err(SetupError::Collision {
                    first: owners[slot],
                    second: participant,
                    node,
                });
            }
            occupied.push(node);
            owners.push(participant);
        }

        let mut positions = Vec::with_capacity(self.seeker_count() + 1);
        for (participant, start) in self.starts().enumerate() {
            let node = match start {
                StartPosition::Fixed(node) => node,
                StartPosition::Random => {
                    let node = rules::random_free_node(graph, &occupied, rng)
                        .ok_or(SetupError::NoFreeStation { participant })?;
                    occupied.push(node);
                    node
                }
            };
            positions.push(node);
        }
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::{GameConfig, SetupError, StartPosition};
    use crate::graph::TransportGraph;
    use crate::model::mode::TravelMode;
    use crate::model::node::Node;
    use crate::model::reveal::RevealSchedule;
    use crate::model::ticket::TicketBook;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn n(id: u16) -> Node {
        Node::new(id).unwrap()
    }

    fn ring(size: u16) -> TransportGraph {
        let mut text = format!("{size}\n");
        for a in 1..=size {
            let b = a % size + 1;
            text.push_str(&format!("TAXI; {a} : : {b}\n"));
        }
        TransportGraph::parse(&text).unwrap()
    }

    fn config(evader: StartPosition, seekers: Vec<StartPosition>) -> GameConfig {
        GameConfig {
            evader_tickets: TicketBook::new().with(TravelMode::Taxi, 4),
            seeker_tickets: TicketBook::new().with(TravelMode::Taxi, 10),
            evader_start: evader,
            seeker_starts: seekers,
            reveal_moves: RevealSchedule::new([3]),
            max_moves: 12,
        }
    }

    #[test]
    fn random_positions_never_collide() {
        let graph = ring(6);
        let cfg = config(
            StartPosition::Random,
            vec![
                StartPosition::Fixed(n(2)),
                StartPosition::Random,
                StartPosition::Random,
                StartPosition::Fixed(n(5)),
            ],
        );
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let positions = cfg.resolve_positions(&graph, &mut rng).unwrap();
            assert_eq!(positions.len(), 5);
            assert_eq!(positions[1], n(2));
            assert_eq!(positions[4], n(5));
            let distinct: BTreeSet<_> = positions.iter().copied().collect();
            assert_eq!(distinct.len(), 5, "seed {seed} produced {positions:?}");
        }
    }

    #[test]
    fn fixed_position_must_be_a_station() {
        let graph = TransportGraph::parse("4\nTAXI; 1 : : 2\n").unwrap();
        let cfg = config(StartPosition::Fixed(n(4)), vec![StartPosition::Fixed(n(1))]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            cfg.resolve_positions(&graph, &mut rng),
            Err(SetupError::NotAStation {
                participant: 0,
                node: n(4)
            })
        );
    }

    #[test]
    fn duplicate_fixed_positions_are_rejected() {
        let graph = ring(4);
        let cfg = config(
            StartPosition::Fixed(n(3)),
            vec![StartPosition::Random, StartPosition::Fixed(n(3))],
        );
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            cfg.resolve_positions(&graph, &mut rng),
            Err(SetupError::Collision {
                first: 0,
                second: 2,
                node: n(3)
            })
        );
    }

    #[test]
    fn too_many_participants_for_the_map() {
        let graph = ring(3);
        let cfg = config(StartPosition::Random, vec![StartPosition::Random; 3]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            cfg.resolve_positions(&graph, &mut rng),
            Err(SetupError::NoFreeStation { participant: 3 })
        );
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let mut cfg = config(StartPosition::Random, Vec::new());
        assert_eq!(cfg.validate(), Err(SetupError::NoSeekers));
        cfg.seeker_starts.push(StartPosition::Random);
        cfg.max_moves = 0;
        assert_eq!(cfg.validate(), Err(SetupError::ZeroMoveLimit));
        cfg.max_moves = 5;
        cfg.reveal_moves = RevealSchedule::new([0, 2]);
        assert_eq!(cfg.validate(), Err(SetupError::ZeroReveal));
    }

    #[test]
    fn start_positions_deserialize_from_numbers_or_random() {
        let starts: Vec<StartPosition> = serde_json::from_str(r#"["random", 13, "Random"]"#).unwrap();
        assert_eq!(
            starts,
            vec![
                StartPosition::Random,
                StartPosition::Fixed(n(13)),
                StartPosition::Random
            ]
        );
        assert!(serde_json::from_str::<StartPosition>(r#""anywhere""#).is_err());
        assert!(serde_json::from_str::<StartPosition>("0").is_err());
    }
}
