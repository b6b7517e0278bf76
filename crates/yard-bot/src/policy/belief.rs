use super::{DecisionContext, RandomStrategy, Strategy};
use std::cmp::Ordering;
use tracing::{Level, event};
use yard_core::belief::BeliefDistribution;
use yard_core::game::GameState;
use yard_core::model::movement::Move;
use yard_core::model::participant::Role;

/// Seeker strategy that heads for where the evader most likely is.
///
/// Moves are ranked by belief weight on the destination, then by belief mass
/// on the destination's neighbors, then by how many tickets of the spent mode
/// remain (scarcer tickets are kept). Remaining ties go to the lowest node.
/// Without a usable belief, and for the evader, it plays randomly.
#[derive(Debug, Clone)]
pub struct BeliefStrategy {
    fallback: RandomStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Score {
    at: f64,
    around: f64,
    tickets: u32,
}

impl Score {
    fn of(mv: Move, state: &GameState, belief: &BeliefDistribution, tickets: u32) -> Self {
        let around = state
            .graph()
            .neighbors(mv.to)
            .into_iter()
            .map(|node| belief.probability(node))
            .sum();
        Self {
            at: belief.probability(mv.to),
            around,
            tickets,
        }
    }

    fn is_blind(&self) -> bool {
        self.at <= 0.0 && self.around <= 0.0
    }

    fn rank(&self, other: &Self) -> Ordering {
        self.at
            .total_cmp(&other.at)
            .then(self.around.total_cmp(&other.around))
            .then(self.tickets.cmp(&other.tickets))
    }
}

impl BeliefStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            fallback: RandomStrategy::new(seed),
        }
    }
}

impl Strategy for BeliefStrategy {
    fn name(&self) -> &'static str {
        "belief"
    }

    fn choose_move(&mut self, ctx: &DecisionContext) -> Option<Move> {
        let participant = ctx.participant()?;
        let belief = match ctx.belief {
            Some(belief) if participant.role() == Role::Seeker && !belief.is_empty() => belief,
            _ => return self.fallback.pick(ctx.legal),
        };

        let mut best: Option<(Move, Score)> = None;
        for mv in ctx.legal.iter().copied() {
            let score = Score::of(mv, ctx.state, belief, participant.tickets().count(mv.mode));
            let better = match &best {
                None => true,
                Some((current, top)) => match score.rank(top) {
                    Ordering::Greater => true,
                    Ordering::Equal => mv.to < current.to,
                    Ordering::Less => false,
                },
            };
            if better {
                best = Some((mv, score));
            }
        }

        match best {
            Some((mv, score)) if !score.is_blind() => {
                log_choice(ctx, mv, &score);
                Some(mv)
            }
            _ => self.fallback.pick(ctx.legal),
        }
    }
}

fn log_choice(ctx: &DecisionContext, chosen: Move, score: &Score) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    event!(
        target: "yard_bot::policy",
        Level::DEBUG,
        participant = ctx.index,
        legal_count = ctx.legal.len(),
        chosen = %chosen,
        weight_at = score.at,
        weight_around = score.around,
        tickets_left = score.tickets,
    );
}
