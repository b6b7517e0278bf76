use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use yard_cli::config::RunConfig;
use yard_cli::logging::init_logging;
use yard_cli::session::Session;

/// Batch runner for hidden-movement pursuit games.
#[derive(Debug, Parser)]
#[command(
    name = "yard",
    author,
    version,
    about = "Plays seeded pursuit games and records the outcomes"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "data/game.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the base seed games are derived from.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration and map (no game is played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = RunConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    config.validate()?;

    let run_id = config.run_id.clone();
    let games = config.games.count;
    let seekers = config.game.seeker_count();
    let outputs = config.resolved_outputs();
    let logging = config.logging.clone();

    let session = Session::load(config)
        .with_context(|| format!("loading run '{run_id}' from {}", cli.config.display()))?;
    session.check_setup()?;

    println!(
        "Loaded configuration '{run_id}': {} stations, {seekers} seeker{}, {games} game{}",
        session.graph().stations().len(),
        if seekers == 1 { "" } else { "s" },
        if games == 1 { "" } else { "s" }
    );

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let logging_guard = init_logging(&logging, &outputs)?;
    let summary = session.run()?;

    println!(
        "Run '{run_id}' complete: {} games → {}",
        summary.games_played,
        summary.jsonl_path.display()
    );
    println!(
        "  Mr. X wins: {}  seeker wins: {}  average evader moves: {:.2}",
        summary.evader_wins, summary.seeker_wins, summary.average_evader_moves
    );
    for (reason, count) in &summary.by_reason {
        println!("  {reason}: {count}");
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
