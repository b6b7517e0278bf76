//! Legal move generation.
//!
//! A concealed (`Black`) ticket may be spent on any edge and is the only way
//! across a ferry. Plain tickets only travel edges of their own mode. No one
//! may move onto a node held by a seeker; seekers may move onto the evader,
//! which is how capture happens.

use crate::game::GameState;
use crate::graph::TransportGraph;
use crate::model::mode::TravelMode;
use crate::model::movement::Move;
use crate::model::node::Node;
use crate::model::participant::ParticipantState;
use rand::Rng;
use rand::seq::IteratorRandom;
use std::collections::BTreeSet;

/// Deduplicated legal moves for `participant`, ordered by (from, to, mode).
pub fn legal_moves(participant: &ParticipantState, state: &GameState) -> Vec<Move> {
    let origin = participant.position();
    let tickets = participant.tickets();
    let seekers = state.seeker_positions();
    let mut moves = BTreeSet::new();

    for link in state.graph().edges_from(origin) {
        if seekers.contains(&link.to) {
            continue;
        }
        if tickets.has(TravelMode::Black) {
            moves.insert(Move::new(origin, link.to, TravelMode::Black));
        }
        if let Some(mode) = link.kind.ticket() {
            if tickets.has(mode) {
                moves.insert(Move::new(origin, link.to, mode));
            }
        }
    }

    moves.into_iter().collect()
}

pub fn is_legal(mv: Move, participant: &ParticipantState, state: &GameState) -> bool {
    mv.from == participant.position() && legal_moves(participant, state).contains(&mv)
}

/// Uniformly picks a station not listed in `occupied`.
pub fn random_free_node<R: Rng + ?Sized>(
    graph: &TransportGraph,
    occupied: &[Node],
    rng: &mut R,
) -> Option<Node> {
    graph
        .stations()
        .keys()
        .copied()
        .filter(|node| !occupied.contains(node))
        .choose(rng)
}
