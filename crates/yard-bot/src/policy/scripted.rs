use super::{DecisionContext, Strategy};
use std::collections::VecDeque;
use tracing::warn;
use yard_core::model::movement::Move;

/// Plays a fixed sequence of moves, one per turn.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStrategy {
    queue: VecDeque<Move>,
}

impl ScriptedStrategy {
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            queue: moves.into_iter().collect(),
        }
    }
}

impl Strategy for ScriptedStrategy {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn choose_move(&mut self, ctx: &DecisionContext) -> Option<Move> {
        let Some(mv) = self.queue.pop_front() else {
            warn!(target: "yard_bot::policy", participant = ctx.index, "script exhausted");
            return None;
        };
        if !ctx.legal.contains(&mv) {
            warn!(
                target: "yard_bot::policy",
                participant = ctx.index,
                mv = %mv,
                "scripted move is not legal here"
            );
            return None;
        }
        Some(mv)
    }
}
