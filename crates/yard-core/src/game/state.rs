use super::config::{GameConfig, SetupError};
use super::outcome::{EvaderVictory, Outcome, SeekerVictory};
use crate::graph::TransportGraph;
use crate::model::movement::Move;
use crate::model::node::Node;
use crate::model::participant::{ParticipantState, Role};
use crate::model::reveal::RevealSchedule;
use crate::model::ticket::TicketError;
use crate::rules;
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Immutable snapshot of a game. Applying a move returns a new state; the
/// previous one stays valid and unchanged.
///
/// Participants are reference counted so a transition only copies the mover.
#[derive(Debug, Clone)]
pub struct GameState {
    graph: Arc<TransportGraph>,
    participants: Vec<Arc<ParticipantState>>,
    reveals: Arc<RevealSchedule>,
    max_moves: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no participant with index {0}")]
    UnknownParticipant(usize),
    #[error("illegal move {mv} for participant {participant}")]
    Illegal { participant: usize, mv: Move },
    #[error("game is already over ({0})")]
    GameOver(Outcome),
    #[error(transparent)]
    Tickets(#[from] TicketError),
}

impl GameState {
    /// Sets up a new game from `config`, drawing random start positions from `rng`.
    pub fn new<R: Rng + ?Sized>(
        graph: Arc<TransportGraph>,
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self, SetupError> {
        let positions = config.resolve_positions(&graph, rng)?;
        let evader = ParticipantState::evader(positions[0], config.evader_tickets);
        let seekers = positions[1..]
            .iter()
            .enumerate()
            .map(|(i, node)| ParticipantState::seeker(i + 1, *node, config.seeker_tickets))
            .collect();
        Self::from_participants(
            graph,
            evader,
            seekers,
            config.reveal_moves.clone(),
            config.max_moves,
        )
    }

    /// Builds a state from explicit participants. Seekers must be listed in
    /// index order starting at 1.
    pub fn from_participants(
        graph: Arc<TransportGraph>,
        evader: ParticipantState,
        seekers: Vec<ParticipantState>,
        reveals: RevealSchedule,
        max_moves: u32,
    ) -> Result<Self, SetupError> {
        if seekers.is_empty() {
            return Err(SetupError::NoSeekers);
        }
        if max_moves == 0 {
            return Err(SetupError::ZeroMoveLimit);
        }
        if reveals.contains(0) {
            return Err(SetupError::ZeroReveal);
        }

        let participants: Vec<ParticipantState> =
            std::iter::once(evader).chain(seekers).collect();
        for (index, participant) in participants.iter().enumerate() {
            if participant.index() != index {
                return Err(SetupError::ParticipantIndex {
                    position: index,
                    index: participant.index(),
                });
            }
            let node = participant.position();
            if !graph.is_station(node) {
                return Err(SetupError::NotAStation {
                    participant: index,
                    node,
                });
            }
            if let Some(first) = participants[..index]
                .iter()
                .position(|other| other.position() == node)
            {
                return Err(SetupError::Collision {
                    first,
                    second: index,
                    node,
                });
            }
        }

        Ok(Self {
            graph,
            participants: participants.into_iter().map(Arc::new).collect(),
            reveals: Arc::new(reveals),
            max_moves,
        })
    }

    pub fn graph(&self) -> &Arc<TransportGraph> {
        &self.graph
    }

    pub fn reveals(&self) -> &RevealSchedule {
        &self.reveals
    }

    pub fn max_moves(&self) -> u32 {
        self.max_moves
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn seeker_count(&self) -> usize {
        self.participants.len() - 1
    }

    pub fn participant(&self, index: usize) -> Option<&ParticipantState> {
        self.participants.get(index).map(Arc::as_ref)
    }

    pub fn participants(&self) -> impl Iterator<Item = &ParticipantState> {
        self.participants.iter().map(Arc::as_ref)
    }

    pub fn evader(&self) -> &ParticipantState {
        &self.participants[0]
    }

    pub fn seekers(&self) -> impl Iterator<Item = &ParticipantState> {
        self.participants[1..].iter().map(Arc::as_ref)
    }

    pub fn seeker_positions(&self) -> Vec<Node> {
        self.seekers().map(ParticipantState::position).collect()
    }

    /// Number of moves the evader has made so far.
    pub fn evader_moves(&self) -> u32 {
        self.evader().move_count()
    }

    /// Stations where the evader may have started: every station except the
    /// seekers' initial nodes.
    pub fn legal_start_positions(&self) -> Vec<Node> {
        let seeker_starts: Vec<Node> = self
            .seekers()
            .map(ParticipantState::start_position)
            .collect();
        self.graph
            .stations()
            .keys()
            .copied()
            .filter(|node| !seeker_starts.contains(node))
            .collect()
    }

    /// Legal moves for the participant at `index`; empty for unknown indices.
    pub fn legal_moves(&self, index: usize) -> Vec<Move> {
        self.participant(index)
            .map(|participant| rules::legal_moves(participant, self))
            .unwrap_or_default()
    }

    /// Returns the state after participant `index` plays `mv`.
    pub fn apply_move(&self, index: usize, mv: Move) -> Result<GameState, MoveError> {
        let participant = self
            .participant(index)
            .ok_or(MoveError::UnknownParticipant(index))?;

        let outcome = self.evaluate_end_state(participant.role());
        if outcome.is_terminal() {
            return Err(MoveError::GameOver(outcome));
        }
        if !rules::is_legal(mv, participant, self) {
            return Err(MoveError::Illegal {
                participant: index,
                mv,
            });
        }

        let reveal = participant.role() == Role::Evader
            && self.reveals.contains(participant.move_count() + 1);

        let mut next = self.clone();
        Arc::make_mut(&mut next.participants[index]).perform(mv, reveal)?;
        debug!(
            target: "yard_core::game",
            participant = index,
            from = %mv.from,
            to = %mv.to,
            mode = %mv.mode,
            reveal,
            "move applied"
        );
        Ok(next)
    }

    /// Decides whether the game is over before `turn` acts.
    ///
    /// Checked in priority order: capture, move limit, evader immobilized,
    /// seekers immobilized.
    pub fn evaluate_end_state(&self, turn: Role) -> Outcome {
        let evader = self.evader();
        if let Some(seeker) = self
            .seekers()
            .find(|seeker| seeker.position() == evader.position())
        {
            return Outcome::SeekersWin(SeekerVictory::Captured {
                seeker: seeker.index(),
            });
        }

        if turn == Role::Evader && evader.move_count() >= self.max_moves {
            return Outcome::EvaderWins(EvaderVictory::MoveLimitReached {
                moves: self.max_moves,
            });
        }

        if turn == Role::Evader && rules::legal_moves(evader, self).is_empty() {
            return Outcome::SeekersWin(SeekerVictory::EvaderImmobilized);
        }

        if turn == Role::Seeker
            && self
                .seekers()
                .all(|seeker| rules::legal_moves(seeker, self).is_empty())
        {
            return Outcome::EvaderWins(EvaderVictory::SeekersImmobilized);
        }

        Outcome::Ongoing
    }
}
