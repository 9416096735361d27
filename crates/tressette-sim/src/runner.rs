use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;

use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event, info, warn};
use tressette_core::model::card::Card;
use tressette_core::model::participant::Role;
use tressette_core::model::points::Points;
use tressette_core::{
    EngineError, EngineEvent, PlayRejection, RoundEngine, RoundPhase, RoundSummary,
};

use crate::config::{HumanPolicy, ResolvedOutputs, SimConfig};

/// Offsets the human seat's RNG from the deal RNG so both stay reproducible.
const HUMAN_SEED_SALT: u64 = 0x7265_5353_4554_5445;
/// Upper bound on engine transitions in one round; a 2-seat round needs 46.
const MAX_STEPS_PER_ROUND: usize = 1_000;

/// Hosts one table: drives the engine clock, plays the human seats and
/// records every finished round.
pub struct TableRunner {
    config: SimConfig,
    outputs: ResolvedOutputs,
    realtime: bool,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub seed: u64,
    pub rounds_played: u32,
    pub aborted_rounds: u32,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub standings: Vec<Standing>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub rounds_won: u32,
}

impl TableRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimConfig, outputs: ResolvedOutputs) -> Self {
        Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            realtime: false,
        }
    }

    /// Sleep through engine delays on the wall clock instead of jumping the
    /// virtual clock straight to the next task.
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Play the configured number of rounds, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut engine = RoundEngine::with_seed(&self.config.roster, self.config.pacing, seed)?;
        let mut human_rng = StdRng::seed_from_u64(seed ^ HUMAN_SEED_SALT);

        engine.subscribe(|event| {
            if let EngineEvent::RoundWinner { name } = event {
                info!(winner = %name, "round winner announced");
            }
        });

        let mut rows_written = 0usize;
        let mut aborted_rounds = 0u32;
        let mut rounds_played = 0u32;
        let mut steps = 0usize;

        while rounds_played < self.config.rounds {
            match engine.phase() {
                RoundPhase::RoundComplete => {
                    let summary = engine
                        .last_round_summary()
                        .cloned()
                        .ok_or(RunnerError::MissingSummary {
                            round: engine.round_number(),
                        })?;
                    rows_written += self.write_round_row(&mut writer, seed, &summary)?;
                    rounds_played += 1;
                    steps = 0;
                    if rounds_played == self.config.rounds {
                        break;
                    }
                }
                RoundPhase::Aborted => {
                    aborted_rounds += 1;
                    warn!(round = engine.round_number(), "restarting aborted round");
                    engine.restart_round()?;
                    steps = 0;
                    continue;
                }
                _ => {}
            }

            steps += 1;
            if steps > MAX_STEPS_PER_ROUND {
                return Err(RunnerError::Stalled {
                    round: engine.round_number(),
                });
            }

            if let Some((name, card)) = self.human_choice(&engine, &mut human_rng) {
                engine.play_card(&name, card)?;
                continue;
            }

            let Some(deadline) = engine.next_deadline() else {
                return Err(RunnerError::Stalled {
                    round: engine.round_number(),
                });
            };
            if self.realtime {
                thread::sleep(deadline.saturating_sub(engine.now()));
            }
            if let Err(err) = engine.step() {
                warn!(round = engine.round_number(), error = %err, "engine fault");
            }
        }

        writer.flush()?;

        info!(rounds = rounds_played, aborted = aborted_rounds, "run finished");
        let standings = engine
            .participants()
            .into_iter()
            .map(|p| Standing {
                name: p.name,
                rounds_won: p.rounds_won,
            })
            .collect();

        Ok(RunSummary {
            seed,
            rounds_played,
            aborted_rounds,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            standings,
        })
    }

    /// The card a human seat plays when it holds the turn, if any.
    fn human_choice(&self, engine: &RoundEngine, rng: &mut StdRng) -> Option<(String, Card)> {
        if !engine.is_turn_active() {
            return None;
        }
        let current = engine.current_participant()?;
        if current.role != Role::Human {
            return None;
        }
        let card = match self.config.human {
            HumanPolicy::FirstCard => current.hand.first().copied(),
            HumanPolicy::Random => current.hand.choose(rng).copied(),
        }?;
        Some((current.name, card))
    }

    fn write_round_row(
        &self,
        writer: &mut BufWriter<File>,
        seed: u64,
        summary: &RoundSummary,
    ) -> Result<usize, RunnerError> {
        let scores = summary
            .scores
            .iter()
            .map(|line| SeatScore {
                name: line.name.clone(),
                points: line.score,
                rounds_won: line.rounds_won,
            })
            .collect();
        let rounds_won = summary
            .scores
            .iter()
            .find(|line| line.name == summary.winner)
            .map_or(0, |line| line.rounds_won);

        let row = RoundLogRow {
            run_id: self.config.run_id.clone(),
            seed,
            round: summary.round,
            winner: summary.winner.clone(),
            scores,
            rounds_won,
            tricks: summary.tricks,
        };

        if self.logging_enabled && tracing::enabled!(Level::INFO) {
            event!(
                target: "tressette_sim::round",
                Level::INFO,
                run_id = %self.config.run_id,
                round = summary.round,
                winner = %summary.winner,
                tricks = summary.tricks
            );
        }

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        Ok(1)
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct SeatScore {
    name: String,
    points: Points,
    rounds_won: u32,
}

#[derive(Serialize)]
struct RoundLogRow {
    run_id: String,
    seed: u64,
    round: u32,
    winner: String,
    scores: Vec<SeatScore>,
    /// Rounds the winner has taken so far, this one included.
    rounds_won: u32,
    tricks: usize,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("scripted play refused: {0}")]
    Rejected(#[from] PlayRejection),
    #[error("round {round} stopped making progress")]
    Stalled { round: u32 },
    #[error("round {round} finished without a summary")]
    MissingSummary { round: u32 },
}
