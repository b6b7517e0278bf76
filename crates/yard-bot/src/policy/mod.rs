mod belief;
mod random;
mod scripted;

pub use belief::BeliefStrategy;
pub use random::RandomStrategy;
pub use scripted::ScriptedStrategy;

use yard_core::belief::BeliefDistribution;
use yard_core::game::GameState;
use yard_core::model::movement::Move;
use yard_core::model::participant::ParticipantState;

/// What a strategy sees when asked for a move.
pub struct DecisionContext<'a> {
    pub index: usize,
    pub state: &'a GameState,
    /// Legal moves for `index`, never empty.
    pub legal: &'a [Move],
    pub belief: Option<&'a BeliefDistribution>,
}

impl<'a> DecisionContext<'a> {
    pub fn participant(&self) -> Option<&'a ParticipantState> {
        self.state.participant(self.index)
    }
}

/// Move selection for one participant.
pub trait Strategy: Send {
    fn name(&self) -> &'static str;

    /// Picks one of `ctx.legal`. Returning `None`, or a move outside the
    /// legal set, skips the turn.
    fn choose_move(&mut self, ctx: &DecisionContext) -> Option<Move>;
}
