use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

/// Level used on stderr when structured logging is off and `RUST_LOG` is unset.
const CONSOLE_LEVEL: Level = Level::WARN;

/// Keeps the telemetry writer alive; dropping it flushes buffered lines.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Installs the global subscriber for a run.
///
/// With structured logging on, events go as JSON to the run's telemetry file
/// and the returned guard must outlive the run. Otherwise warnings and errors
/// go to stderr as plain text and `None` is returned.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        let console = fmt()
            .with_env_filter(env_filter_or(CONSOLE_LEVEL))
            .with_target(false)
            .with_writer(io::stderr)
            .finish();
        // Another subscriber may already be set, as under tests.
        let _ = tracing::subscriber::set_global_default(console);
        return Ok(None);
    }

    let telemetry_path = outputs.telemetry.clone();
    let file = open_telemetry(&telemetry_path)?;
    let (writer, guard) = NonBlockingBuilder::default().lossy(false).finish(file);

    let json = fmt()
        .with_env_filter(env_filter_or(logging.level().unwrap_or(Level::INFO)))
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();
    let _ = tracing::subscriber::set_global_default(json);
    tracing::info!(run_id, "structured logging enabled");

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}

/// `RUST_LOG` wins over the configured level.
fn env_filter_or(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

fn open_telemetry(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating telemetry directory at {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("creating telemetry file at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn plain_logging_returns_no_guard_and_writes_no_telemetry() {
        let dir = tempdir().expect("temp dir");
        let outputs = ResolvedOutputs {
            jsonl: dir.path().join("rounds.jsonl"),
            telemetry: dir.path().join("logs").join("telemetry.jsonl"),
        };

        let guard = init_logging(&LoggingConfig::default(), &outputs, "plain")
            .expect("console logging installs");

        assert!(guard.is_none());
        assert!(!outputs.telemetry.exists());
        assert!(!dir.path().join("logs").exists());
    }

    #[test]
    fn telemetry_file_opens_under_missing_directories() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("telemetry.jsonl");

        open_telemetry(&path).expect("file created");

        assert!(path.exists());
    }
}
