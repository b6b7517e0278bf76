pub mod agent;
pub mod policy;
pub mod runner;

pub use agent::Agent;
pub use policy::{BeliefStrategy, DecisionContext, RandomStrategy, ScriptedStrategy, Strategy};
pub use runner::{GameReport, GameRunner, RunnerError};
