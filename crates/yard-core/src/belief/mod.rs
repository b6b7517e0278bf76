//! Probabilistic tracking of the evader's hidden node.
//!
//! This module is composed of:
//! - `distribution`: the weight table over nodes (`BeliefDistribution`).
//! - `exact`: forward-algorithm updates from ticket evidence and reveals
//!   (`BeliefEngine`, `BeliefError`).

mod distribution;
mod exact;

pub use distribution::BeliefDistribution;
pub use exact::{BeliefEngine, BeliefError};
