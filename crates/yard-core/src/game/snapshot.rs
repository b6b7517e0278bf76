use super::state::GameState;
use crate::model::mode::TravelMode;
use crate::model::node::Node;
use crate::model::participant::{ParticipantState, Role};
use crate::model::ticket::TicketBook;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who the snapshot is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// What the seekers know: the evader's node is withheld.
    Public,
    Omniscient,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub evader_moves: u32,
    pub max_moves: u32,
    pub participants: Vec<ParticipantSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantSnapshot {
    pub index: usize,
    pub role: Role,
    pub position: Option<Node>,
    pub tickets: TicketBook,
    pub tickets_used: Vec<TravelMode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub revealed: BTreeMap<u32, Node>,
}

impl ParticipantSnapshot {
    fn capture(participant: &ParticipantState, perspective: Perspective) -> Self {
        let hidden = participant.role() == Role::Evader && perspective == Perspective::Public;
        Self {
            index: participant.index(),
            role: participant.role(),
            position: (!hidden).then(|| participant.position()),
            tickets: *participant.tickets(),
            tickets_used: participant.ticket_history().collect(),
            revealed: participant.revealed().clone(),
        }
    }
}

impl GameSnapshot {
    pub fn capture(state: &GameState, perspective: Perspective) -> Self {
        Self {
            evader_moves: state.evader_moves(),
            max_moves: state.max_moves(),
            participants: state
                .participants()
                .map(|participant| ParticipantSnapshot::capture(participant, perspective))
                .collect(),
        }
    }

    pub fn to_json(state: &GameState, perspective: Perspective) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(state, perspective))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::{GameSnapshot, Perspective};
    use crate::game::state::GameState;
    use crate::graph::TransportGraph;
    use crate::model::mode::TravelMode;
    use crate::model::movement::Move;
    use crate::model::node::Node;
    use crate::model::participant::ParticipantState;
    use crate::model::reveal::RevealSchedule;
    use crate::model::ticket::TicketBook;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn n(id: u16) -> Node {
        Node::new(id).unwrap()
    }

    fn played_game() -> GameState {
        let graph = Arc::new(
            TransportGraph::parse("4\nTAXI; 1 : : 2\nBUS; 2 : : 3\nTAXI; 3 : : 4\n").unwrap(),
        );
        let evader = ParticipantState::evader(
            n(1),
            TicketBook::new()
                .with(TravelMode::Taxi, 2)
                .with(TravelMode::Black, 1),
        );
        let seeker = ParticipantState::seeker(1, n(4), TicketBook::new().with(TravelMode::Taxi, 3));
        let game =
            GameState::from_participants(graph, evader, vec![seeker], RevealSchedule::new([2]), 8)
                .unwrap();
        game.apply_move(0, Move::new(n(1), n(2), TravelMode::Taxi))
            .unwrap()
            .apply_move(0, Move::new(n(2), n(3), TravelMode::Black))
            .unwrap()
    }

    #[test]
    fn public_snapshot_hides_evader_position() {
        let snapshot = GameSnapshot::capture(&played_game(), Perspective::Public);
        let evader = &snapshot.participants[0];
        assert_eq!(evader.position, None);
        assert_eq!(
            evader.tickets_used,
            vec![TravelMode::Taxi, TravelMode::Black]
        );
        assert_eq!(evader.revealed, BTreeMap::from([(2, n(3))]));
        assert_eq!(snapshot.participants[1].position, Some(n(4)));
    }

    #[test]
    fn omniscient_snapshot_roundtrips_through_json() {
        let game = played_game();
        let json = GameSnapshot::to_json(&game, Perspective::Omniscient).unwrap();
        assert!(json.contains("\"evader_moves\": 2"));
        let restored = GameSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, GameSnapshot::capture(&game, Perspective::Omniscient));
        assert_eq!(restored.participants[0].position, Some(n(3)));
    }
}
