use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event, info};
use yard_bot::{Agent, BeliefStrategy, GameReport, GameRunner, RandomStrategy, RunnerError, Strategy};
use yard_core::belief::BeliefEngine;
use yard_core::game::{GameState, SetupError};
use yard_core::graph::{LoadError, TransportGraph};
use yard_core::model::participant::Role;

use crate::config::{ResolvedOutputs, RunConfig, StrategyKind};

/// Plays the configured batch of games and streams one JSON row per game.
pub struct Session {
    config: RunConfig,
    outputs: ResolvedOutputs,
    graph: Arc<TransportGraph>,
}

/// Totals for a finished batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub games_played: usize,
    pub evader_wins: usize,
    pub seeker_wins: usize,
    /// Game count per outcome label, e.g. `captured`.
    pub by_reason: BTreeMap<&'static str, usize>,
    pub average_evader_moves: f64,
    pub jsonl_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct GameRow<'a> {
    run_id: &'a str,
    game: usize,
    seed: u64,
    evader_strategy: &'static str,
    seeker_strategy: &'static str,
    winner: Option<Role>,
    reason: &'static str,
    #[serde(flatten)]
    report: &'a GameReport,
}

impl Session {
    /// Loads the layout named by `config`.
    pub fn load(config: RunConfig) -> Result<Self, SessionError> {
        let graph = TransportGraph::from_path(&config.layout)?;
        Ok(Self::new(config, Arc::new(graph)))
    }

    pub fn new(config: RunConfig, graph: Arc<TransportGraph>) -> Self {
        let outputs = config.resolved_outputs();
        Self {
            config,
            outputs,
            graph,
        }
    }

    pub fn graph(&self) -> &TransportGraph {
        &self.graph
    }

    pub fn outputs(&self) -> &ResolvedOutputs {
        &self.outputs
    }

    /// Sets up the first game without playing it, so fixed start positions
    /// are checked against the map.
    pub fn check_setup(&self) -> Result<(), SessionError> {
        let seed = StdRng::seed_from_u64(self.base_seed()).next_u64();
        self.setup(0, seed).map(|_| ())
    }

    pub fn run(&self) -> Result<SessionSummary, SessionError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.base_seed());

        let mut summary = SessionSummary {
            games_played: 0,
            evader_wins: 0,
            seeker_wins: 0,
            by_reason: BTreeMap::new(),
            average_evader_moves: 0.0,
            jsonl_path: self.outputs.jsonl.clone(),
        };
        let mut total_moves = 0u64;

        for game in 0..self.config.games.count {
            let seed = rng.next_u64();
            let report = self.play(game, seed)?;

            let row = GameRow {
                run_id: &self.config.run_id,
                game,
                seed,
                evader_strategy: strategy_label(self.config.agents.evader),
                seeker_strategy: strategy_label(self.config.agents.seekers),
                winner: report.outcome.winner(),
                reason: report.outcome.label(),
                report: &report,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;

            summary.games_played += 1;
            match report.outcome.winner() {
                Some(Role::Evader) => summary.evader_wins += 1,
                Some(Role::Seeker) => summary.seeker_wins += 1,
                None => {}
            }
            *summary.by_reason.entry(report.outcome.label()).or_insert(0) += 1;
            total_moves += u64::from(report.evader_moves);
        }

        writer.flush()?;
        if summary.games_played > 0 {
            summary.average_evader_moves = total_moves as f64 / summary.games_played as f64;
        }

        info!(
            target: "yard_cli::session",
            run_id = %self.config.run_id,
            games = summary.games_played,
            evader_wins = summary.evader_wins,
            seeker_wins = summary.seeker_wins,
            "batch finished"
        );
        Ok(summary)
    }

    /// Plays game number `game` from `seed`. The same seed always replays
    /// the same game.
    pub fn play(&self, game: usize, seed: u64) -> Result<GameReport, SessionError> {
        let state = self.setup(game, seed)?;
        let agents = self.agents(&state, seed);
        event!(
            target: "yard_cli::session",
            Level::DEBUG,
            game,
            seed,
            evader_start = %state.evader().position(),
        );
        GameRunner::new(state, agents)
            .and_then(GameRunner::run)
            .map_err(|source| SessionError::Game { game, source })
    }

    fn base_seed(&self) -> u64 {
        self.config.games.seed.unwrap_or(0)
    }

    fn setup(&self, game: usize, seed: u64) -> Result<GameState, SessionError> {
        let mut rng = StdRng::seed_from_u64(seed);
        GameState::new(Arc::clone(&self.graph), &self.config.game, &mut rng)
            .map_err(|source| SessionError::Setup { game, source })
    }

    fn agents(&self, state: &GameState, seed: u64) -> Vec<Agent> {
        let kinds = &self.config.agents;
        (0..state.participant_count())
            .map(|index| {
                let agent_seed = seed.wrapping_add(index as u64 + 1);
                let kind = if index == 0 { kinds.evader } else { kinds.seekers };
                let strategy: Box<dyn Strategy> = match kind {
                    StrategyKind::Random => Box::new(RandomStrategy::new(agent_seed)),
                    StrategyKind::Belief => Box::new(BeliefStrategy::new(agent_seed)),
                };
                let agent = Agent::new(index, strategy);
                if index > 0 && kind == StrategyKind::Belief {
                    agent.with_belief(BeliefEngine::for_game(state))
                } else {
                    agent
                }
            })
            .collect()
    }
}

fn strategy_label(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::Random => "random",
        StrategyKind::Belief => "belief",
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), SessionError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to load layout: {0}")]
    Layout(#[from] LoadError),
    #[error("game {game} could not be set up: {source}")]
    Setup {
        game: usize,
        #[source]
        source: SetupError,
    },
    #[error("game {game} aborted: {source}")]
    Game {
        game: usize,
        #[source]
        source: RunnerError,
    },
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize game row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;

    const LAYOUT: &str = "\
8
TAXI; 1 : : 2
TAXI; 2 : : 3
TAXI; 3 : : 4
TAXI; 4 : : 5
TAXI; 5 : : 6
TAXI; 6 : : 7
TAXI; 7 : : 8
TAXI; 8 : : 1
BUS; 1 : 2 3 : 4
UNDERGROUND; 2 : : 6
FERRY; 3 : : 7
";

    fn config(seekers: &str, starts: &str) -> RunConfig {
        let yaml = format!(
            r#"
run_id: "unit"
layout: "unused.txt"
game:
  evader_tickets: {{ TAXI: 4, BUS: 2, UNDERGROUND: 2, BLACK: 2 }}
  seeker_tickets: {{ TAXI: 6, BUS: 2, UNDERGROUND: 1 }}
  evader_start: random
  seeker_starts: {starts}
  reveal_moves: [2, 4]
  max_moves: 6
agents:
  seekers: {seekers}
games:
  count: 3
  seed: 11
outputs:
  jsonl: "games.jsonl"
"#
        );
        let mut cfg: RunConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("valid");
        cfg
    }

    fn session(seekers: &str, starts: &str) -> Session {
        let graph = Arc::new(TransportGraph::parse(LAYOUT).expect("layout"));
        Session::new(config(seekers, starts), graph)
    }

    #[test]
    fn same_seed_replays_the_same_game() {
        let session = session("belief", "[random, random]");
        let first = session.play(0, 1234).expect("game runs");
        let second = session.play(0, 1234).expect("game runs");
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.snapshot, second.snapshot);
        assert!(first.outcome.is_terminal());
    }

    #[test]
    fn belief_seekers_track_with_their_own_engines() {
        let session = session("belief", "[random, random]");
        let state = session.setup(0, 5).expect("setup");
        let agents = session.agents(&state, 5);
        assert_eq!(agents.len(), 3);
        assert!(agents[0].belief().is_none());
        assert!(agents[1..].iter().all(|agent| agent.belief().is_some()));
        assert_eq!(agents[1].strategy_name(), "belief");
    }

    #[test]
    fn colliding_fixed_starts_fail_setup() {
        let session = session("random", "[1, 1]");
        assert!(matches!(
            session.check_setup(),
            Err(SessionError::Setup { game: 0, .. })
        ));
    }
}
