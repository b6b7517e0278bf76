//! Exact forward-algorithm inference over the evader's node.

use super::distribution::BeliefDistribution;
use crate::game::GameState;
use crate::graph::TransportGraph;
use crate::model::mode::TravelMode;
use crate::model::node::Node;
use crate::model::reveal::RevealSchedule;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeliefError {
    /// No node is consistent with the evidence; the distribution is left empty.
    #[error("evidence for move {move_number} is inconsistent with the map")]
    InconsistentEvidence { move_number: u32 },
    #[error("move {move_number} is a scheduled reveal but no position was supplied")]
    MissingReveal { move_number: u32 },
    /// Seeker nodes for all but the latest move are gone from the state.
    #[error("{pending} evader moves are pending; observe after every evader move")]
    StaleObservation { pending: usize },
}

/// Belief over the evader's node, advanced once per evader move.
#[derive(Debug, Clone)]
pub struct BeliefEngine {
    graph: Arc<TransportGraph>,
    reveals: RevealSchedule,
    distribution: BeliefDistribution,
    next_move_index: u32,
}

impl BeliefEngine {
    /// Starts from a uniform prior over `start_candidates`.
    pub fn new(
        graph: Arc<TransportGraph>,
        reveals: RevealSchedule,
        start_candidates: impl IntoIterator<Item = Node>,
    ) -> Self {
        Self {
            graph,
            reveals,
            distribution: BeliefDistribution::uniform(start_candidates),
            next_move_index: 0,
        }
    }

    /// Prior for a fresh game: uniform over the stations not held by a seeker
    /// at the start.
    pub fn for_game(state: &GameState) -> Self {
        Self::new(
            Arc::clone(state.graph()),
            state.reveals().clone(),
            state.legal_start_positions(),
        )
    }

    pub fn distribution(&self) -> &BeliefDistribution {
        &self.distribution
    }

    pub fn most_likely_nodes(&self) -> Vec<Node> {
        self.distribution.most_likely()
    }

    /// Zero-based index of the next evader move to incorporate.
    pub fn next_move_index(&self) -> u32 {
        self.next_move_index
    }

    /// Incorporates one evader move.
    ///
    /// On a scheduled reveal the belief collapses onto `revealed`. Otherwise
    /// each node's weight is split evenly over the neighbors reachable with
    /// `mode` that no seeker occupies. `seekers` holds the seekers' nodes at the
    /// time of the move.
    pub fn update(
        &mut self,
        mode: TravelMode,
        revealed: Option<Node>,
        seekers: &[Node],
    ) -> Result<(), BeliefError> {
        let move_number = self.next_move_index + 1;

        if self.reveals.contains(move_number) {
            let node = revealed.ok_or(BeliefError::MissingReveal { move_number })?;
            self.distribution = BeliefDistribution::point(node);
            self.next_move_index += 1;
            debug!(target: "yard_core::belief", move_number, node = %node, "belief collapsed on reveal");
            return Ok(());
        }

        if let Some(node) = revealed {
            warn!(
                target: "yard_core::belief",
                move_number,
                node = %node,
                "ignoring reveal on a move that is not scheduled"
            );
        }

        self.distribution = self.propagate(mode, seekers);
        self.next_move_index += 1;

        if self.distribution.is_empty() {
            warn!(target: "yard_core::belief", move_number, mode = %mode, "belief mass collapsed");
            return Err(BeliefError::InconsistentEvidence { move_number });
        }

        debug!(
            target: "yard_core::belief",
            move_number,
            mode = %mode,
            support = self.distribution.len(),
            max = self.distribution.max_weight(),
            "belief propagated"
        );
        Ok(())
    }

    /// Feeds the evader's latest move in `state` if it is not yet
    /// incorporated. Returns how many moves were consumed (0 or 1).
    ///
    /// Seekers are taken at their current nodes, so this must run right after
    /// each evader move. More than one pending move is rejected with
    /// [`BeliefError::StaleObservation`] and leaves the belief untouched; use
    /// [`BeliefEngine::update`] with the recorded seeker nodes to replay.
    pub fn observe(&mut self, state: &GameState) -> Result<usize, BeliefError> {
        let evader = state.evader();
        let start = self.next_move_index as usize;
        let pending = evader.history().get(start..).unwrap_or(&[]);

        match pending {
            [] => Ok(0),
            [mv] => {
                let move_number = self.next_move_index + 1;
                let seekers = state.seeker_positions();
                self.update(mv.mode, evader.revealed_at(move_number), &seekers)?;
                Ok(1)
            }
            _ => Err(BeliefError::StaleObservation {
                pending: pending.len(),
            }),
        }
    }

    /// Resets to uniform over every station, keeping the move cursor.
    pub fn reset_uniform(&mut self) {
        self.distribution = BeliefDistribution::uniform(self.graph.stations().keys().copied());
    }

    fn propagate(&self, mode: TravelMode, seekers: &[Node]) -> BeliefDistribution {
        let mut next: BTreeMap<Node, f64> = BTreeMap::new();
        for (origin, weight) in self.distribution.iter() {
            if weight <= 0.0 {
                continue;
            }
            let candidates = self.candidates(origin, mode, seekers);
            if candidates.is_empty() {
                continue;
            }
            let share = weight / candidates.len() as f64;
            for node in candidates {
                *next.entry(node).or_insert(0.0) += share;
            }
        }
        BeliefDistribution::from_weights(next)
    }

    /// Destinations from `origin` consistent with having spent `mode`.
    fn candidates(&self, origin: Node, mode: TravelMode, seekers: &[Node]) -> BTreeSet<Node> {
        self.graph
            .edges_from(origin)
            .iter()
            .filter(|link| mode.travels(link.kind))
            .map(|link| link.to)
            .filter(|node| !seekers.contains(node))
            .collect()
    }
}
