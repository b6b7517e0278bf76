use crate::agent::Agent;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use yard_core::belief::BeliefError;
use yard_core::game::{GameSnapshot, GameState, MoveError, Outcome, Perspective};
use yard_core::model::participant::Role;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("expected {expected} agents, got {actual}")]
    AgentCount { expected: usize, actual: usize },
    #[error("agent at position {position} controls participant {index}")]
    AgentIndex { position: usize, index: usize },
    #[error("move rejected: {0}")]
    Move(#[from] MoveError),
    #[error("belief update failed: {0}")]
    Belief(#[from] BeliefError),
    #[error("game still running after {turns} turns")]
    TurnLimit { turns: usize },
}

/// Summary of one finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub outcome: Outcome,
    pub evader_moves: u32,
    /// Completed evader-then-seekers rounds.
    pub rounds: usize,
    pub turns: usize,
    pub skipped_turns: usize,
    pub snapshot: GameSnapshot,
}

/// Drives one game: the evader moves, then each seeker in index order,
/// until an end condition holds.
#[derive(Debug)]
pub struct GameRunner {
    state: GameState,
    agents: Vec<Agent>,
    max_turns: usize,
}

impl GameRunner {
    /// `agents[i]` must control participant `i`.
    pub fn new(state: GameState, agents: Vec<Agent>) -> Result<Self, RunnerError> {
        let expected = state.participant_count();
        if agents.len() != expected {
            return Err(RunnerError::AgentCount {
                expected,
                actual: agents.len(),
            });
        }
        if let Some((position, agent)) = agents
            .iter()
            .enumerate()
            .find(|(position, agent)| agent.index() != *position)
        {
            return Err(RunnerError::AgentIndex {
                position,
                index: agent.index(),
            });
        }
        let max_turns = (state.max_moves() as usize + 1) * expected;
        Ok(Self {
            state,
            agents,
            max_turns,
        })
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn run(mut self) -> Result<GameReport, RunnerError> {
        let count = self.agents.len();
        let mut index = 0usize;
        let mut turns = 0usize;
        let mut rounds = 0usize;
        let mut skipped_turns = 0usize;

        info!(
            target: "yard_bot::runner",
            participants = count,
            max_moves = self.state.max_moves(),
            evader_start = %self.state.evader().position(),
            "game started"
        );

        let outcome = loop {
            let outcome = self.state.evaluate_end_state(Role::of_index(index));
            if outcome.is_terminal() {
                break outcome;
            }
            if turns >= self.max_turns {
                warn!(target: "yard_bot::runner", turns, "turn limit reached");
                return Err(RunnerError::TurnLimit { turns });
            }
            turns += 1;

            match self.agents[index].decide(&self.state) {
                Some(mv) => {
                    self.state = self.state.apply_move(index, mv)?;
                    debug!(
                        target: "yard_bot::runner",
                        turn = turns,
                        participant = index,
                        from = %mv.from,
                        to = %mv.to,
                        mode = %mv.mode,
                        "move applied"
                    );
                    if index == 0 {
                        for agent in &mut self.agents {
                            agent.observe(&self.state)?;
                        }
                    }
                }
                None => {
                    skipped_turns += 1;
                    warn!(
                        target: "yard_bot::runner",
                        turn = turns,
                        participant = index,
                        strategy = self.agents[index].strategy_name(),
                        "turn skipped"
                    );
                }
            }

            index = (index + 1) % count;
            if index == 0 {
                rounds += 1;
            }
        };

        info!(
            target: "yard_bot::runner",
            outcome = %outcome,
            result = outcome.label(),
            evader_moves = self.state.evader_moves(),
            turns,
            skipped_turns,
            "game finished"
        );

        Ok(GameReport {
            outcome,
            evader_moves: self.state.evader_moves(),
            rounds,
            turns,
            skipped_turns,
            snapshot: GameSnapshot::capture(&self.state, Perspective::Omniscient),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{GameRunner, RunnerError};
    use crate::agent::Agent;
    use crate::policy::{RandomStrategy, ScriptedStrategy};
    use std::sync::Arc;
    use yard_core::game::GameState;
    use yard_core::graph::TransportGraph;
    use yard_core::model::mode::TravelMode;
    use yard_core::model::node::Node;
    use yard_core::model::participant::ParticipantState;
    use yard_core::model::reveal::RevealSchedule;
    use yard_core::model::ticket::TicketBook;

    fn n(id: u16) -> Node {
        Node::new(id).unwrap()
    }

    fn state() -> GameState {
        let graph = Arc::new(TransportGraph::parse("3\nTAXI; 1 : : 2\nTAXI; 2 : : 3\n").unwrap());
        let tickets = TicketBook::new().with(TravelMode::Taxi, 9);
        GameState::from_participants(
            graph,
            ParticipantState::evader(n(1), tickets),
            vec![ParticipantState::seeker(1, n(3), tickets)],
            RevealSchedule::default(),
            4,
        )
        .unwrap()
    }

    #[test]
    fn rejects_missing_agents() {
        let err = GameRunner::new(state(), vec![Agent::new(0, Box::new(RandomStrategy::new(0)))])
            .unwrap_err();
        assert!(matches!(
            err,
            RunnerError::AgentCount {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn rejects_agents_out_of_order() {
        let agents = vec![
            Agent::new(1, Box::new(RandomStrategy::new(0))),
            Agent::new(0, Box::new(RandomStrategy::new(0))),
        ];
        let err = GameRunner::new(state(), agents).unwrap_err();
        assert!(matches!(
            err,
            RunnerError::AgentIndex {
                position: 0,
                index: 1
            }
        ));
    }

    #[test]
    fn idle_agents_hit_the_turn_limit() {
        let agents = vec![
            Agent::new(0, Box::new(ScriptedStrategy::default())),
            Agent::new(1, Box::new(ScriptedStrategy::default())),
        ];
        let err = GameRunner::new(state(), agents)
            .unwrap()
            .with_max_turns(6)
            .run()
            .unwrap_err();
        assert!(matches!(err, RunnerError::TurnLimit { turns: 6 }));
    }
}
