use crate::policy::{DecisionContext, Strategy};
use tracing::warn;
use yard_core::belief::{BeliefEngine, BeliefError};
use yard_core::game::GameState;
use yard_core::model::movement::Move;
use yard_core::model::participant::Role;

/// One participant's controller: a strategy plus, optionally, its own belief
/// about the evader's node.
pub struct Agent {
    index: usize,
    role: Role,
    strategy: Box<dyn Strategy>,
    belief: Option<BeliefEngine>,
}

impl Agent {
    pub fn new(index: usize, strategy: Box<dyn Strategy>) -> Self {
        Self {
            index,
            role: Role::of_index(index),
            strategy,
            belief: None,
        }
    }

    pub fn with_belief(mut self, engine: BeliefEngine) -> Self {
        self.belief = Some(engine);
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn belief(&self) -> Option<&BeliefEngine> {
        self.belief.as_ref()
    }

    /// Brings the belief up to date with the evader moves in `state`.
    ///
    /// Contradictory evidence resets the belief to uniform over all stations
    /// and keeps going; a missing reveal is returned to the caller.
    pub fn observe(&mut self, state: &GameState) -> Result<(), BeliefError> {
        let Some(engine) = self.belief.as_mut() else {
            return Ok(());
        };
        loop {
            match engine.observe(state) {
                Ok(_) => return Ok(()),
                Err(BeliefError::InconsistentEvidence { move_number }) => {
                    warn!(
                        target: "yard_bot::agent",
                        participant = self.index,
                        move_number,
                        "belief lost the evader, resetting to uniform"
                    );
                    engine.reset_uniform();
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Asks the strategy for a move. `None` means the agent passes, either
    /// because nothing is legal or because the strategy declined.
    pub fn decide(&mut self, state: &GameState) -> Option<Move> {
        let legal = state.legal_moves(self.index);
        if legal.is_empty() {
            return None;
        }
        let ctx = DecisionContext {
            index: self.index,
            state,
            legal: &legal,
            belief: self.belief.as_ref().map(BeliefEngine::distribution),
        };
        let chosen = self.strategy.choose_move(&ctx)?;
        if legal.contains(&chosen) {
            Some(chosen)
        } else {
            warn!(
                target: "yard_bot::agent",
                participant = self.index,
                strategy = self.strategy.name(),
                mv = %chosen,
                "strategy proposed an illegal move"
            );
            None
        }
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("index", &self.index)
            .field("role", &self.role)
            .field("strategy", &self.strategy.name())
            .field("belief", &self.belief.is_some())
            .finish()
    }
}
