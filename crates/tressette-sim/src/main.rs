use std::path::PathBuf;

use clap::Parser;

use tressette_sim::config::{ResolvedOutputs, SimConfig};
use tressette_sim::logging::init_logging;
use tressette_sim::runner::TableRunner;

/// Headless host for a Tressette table.
#[derive(Debug, Parser)]
#[command(
    name = "tressette-sim",
    author,
    version,
    about = "Plays Tressette rounds between scripted humans and bots"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "sim/demo.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to play.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<u32>,

    /// Override the RNG seed for shuffling.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Wait out the pacing delays on the wall clock.
    #[arg(long)]
    realtime: bool,

    /// Exit after validating the configuration (no rounds are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let seats = config.roster.len();
    let run_id = config.run_id.clone();
    let rounds = config.rounds;

    println!("Loaded configuration '{run_id}' with {seats} seats ({rounds} rounds)");

    if cli.validate_only {
        println!("Validation-only mode: no rounds played.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = TableRunner::new(config, outputs).with_realtime(cli.realtime);

    let summary = runner.run()?;
    println!(
        "Run '{run_id}' complete (seed {}): {} rounds, {} rows at {}",
        summary.seed,
        summary.rounds_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    if summary.aborted_rounds > 0 {
        println!("Aborted rounds restarted: {}", summary.aborted_rounds);
    }
    for standing in &summary.standings {
        println!("  {:<16} {} rounds won", standing.name, standing.rounds_won);
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
