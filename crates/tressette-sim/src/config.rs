use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;
use tressette_core::EngineConfig;
use tressette_core::RosterEntry;
use tressette_core::game::deal::cards_per_participant;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";
const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimConfig {
    pub run_id: String,
    #[serde(default)]
    pub seed: Option<u64>,
    pub rounds: u32,
    pub roster: Vec<RosterEntry>,
    #[serde(default)]
    pub pacing: EngineConfig,
    #[serde(default)]
    pub human: HumanPolicy,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        if self.rounds == 0 {
            return Err(ValidationError::InvalidField {
                field: "rounds".to_string(),
                message: "number of rounds must be greater than zero".to_string(),
            });
        }
        validate_roster(&self.roster)?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        let jsonl = resolve_template(&self.run_id, &self.outputs.jsonl);
        let telemetry = jsonl
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(TELEMETRY_FILE);
        ResolvedOutputs { jsonl, telemetry }
    }
}

/// How the scripted human seat chooses its card.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HumanPolicy {
    /// Same card a bot would pick.
    #[default]
    FirstCard,
    /// Uniformly random card from the hand, seeded from the run seed.
    Random,
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        if self.jsonl.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "outputs.jsonl".to_string(),
                message: "path must not be empty".to_string(),
            });
        }

        let resolved = resolve_template(run_id, &self.jsonl);
        if resolved.file_name().is_none() {
            return Err(ValidationError::InvalidField {
                field: "outputs.jsonl".to_string(),
                message: "resolved path does not name a file".to_string(),
            });
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_roster(roster: &[RosterEntry]) -> Result<(), ValidationError> {
    if cards_per_participant(roster.len()).is_err() {
        return Err(ValidationError::InvalidField {
            field: "roster".to_string(),
            message: format!("a table seats 2 to 4 participants, found {}", roster.len()),
        });
    }

    let mut seen = HashSet::new();
    for (index, entry) in roster.iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("roster[{index}].name"),
                message: "participant name must not be empty".to_string(),
            });
        }

        if !seen.insert(entry.name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "roster".to_string(),
                message: format!("participant name '{}' defined more than once", entry.name),
            });
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    /// Structured log sink, next to the JSONL rows.
    pub telemetry: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tressette_core::model::participant::Role;

    const BASIC_YAML: &str = r#"
run_id: "table_smoke"
seed: 123
rounds: 3
roster:
  - name: "Ada"
    role: "human"
  - name: "Bot 1"
    role: "bot"
  - name: "Bot 2"
    role: "bot"
pacing:
  bot_play_ms: 10
outputs:
  jsonl: "sim/out/{run_id}/rounds.jsonl"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: SimConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.roster[0].role, Role::Human);
        assert_eq!(cfg.roster[2].name, "Bot 2");
        assert_eq!(cfg.pacing.bot_play_ms, 10);
        assert_eq!(
            cfg.pacing.trick_resolution_ms,
            EngineConfig::default().trick_resolution_ms
        );
        assert_eq!(cfg.human, HumanPolicy::FirstCard);
        assert!(cfg.logging.enable_structured);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("sim/out/table_smoke/rounds.jsonl")
        );
        assert_eq!(
            outputs.telemetry,
            PathBuf::from("sim/out/table_smoke/telemetry.jsonl")
        );
    }

    #[test]
    fn human_policy_parses_random() {
        let yaml = format!("{BASIC_YAML}human: \"random\"\n");
        let cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(cfg.human, HumanPolicy::Random);
    }

    #[test]
    fn rejects_zero_rounds() {
        let yaml = BASIC_YAML.replace("rounds: 3", "rounds: 0");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "rounds"
        ));
    }

    #[test]
    fn rejects_oversized_table() {
        let yaml = BASIC_YAML.replace(
            "pacing:",
            "  - name: \"Bot 3\"\n    role: \"bot\"\n  - name: \"Bot 4\"\n    role: \"bot\"\npacing:",
        );
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(cfg.roster.len(), 5);
        let err = cfg.validate().expect_err("five seats should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "roster"
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let yaml = BASIC_YAML.replace("\"Bot 2\"", "\"Bot 1\"");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("duplicate names should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, message }
                if field == "roster" && message.contains("Bot 1")
        ));
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("table_smoke", "table smoke");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("invalid run id");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "run_id"
        ));
    }

    #[test]
    fn empty_tracing_level_falls_back_to_info() {
        let yaml = BASIC_YAML.replace("\"debug\"", "\"\"");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(cfg.logging.tracing_level, "info");
    }

    #[test]
    fn outputs_resolve_template_multiple_occurrences() {
        let yaml = BASIC_YAML.replace(
            "sim/out/{run_id}/rounds.jsonl",
            "sim/out/{run_id}/{run_id}.jsonl",
        );
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("valid");
        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("sim/out/table_smoke/table_smoke.jsonl")
        );
    }
}
