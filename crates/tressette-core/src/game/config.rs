use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BOT_PLAY_MS: u64 = 800;
const DEFAULT_TRICK_RESOLUTION_MS: u64 = 1_500;
const DEFAULT_ROUND_RESTART_MS: u64 = 3_000;

/// Pacing delays between engine transitions, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_bot_play_ms")]
    pub bot_play_ms: u64,
    #[serde(default = "default_trick_resolution_ms")]
    pub trick_resolution_ms: u64,
    #[serde(default = "default_round_restart_ms")]
    pub round_restart_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bot_play_ms: DEFAULT_BOT_PLAY_MS,
            trick_resolution_ms: DEFAULT_TRICK_RESOLUTION_MS,
            round_restart_ms: DEFAULT_ROUND_RESTART_MS,
        }
    }
}

impl EngineConfig {
    /// Every delay set to zero; deferred work still waits for the host to
    /// drive the clock.
    pub const fn immediate() -> Self {
        Self {
            bot_play_ms: 0,
            trick_resolution_ms: 0,
            round_restart_ms: 0,
        }
    }

    pub fn bot_play_delay(&self) -> Duration {
        Duration::from_millis(self.bot_play_ms)
    }

    pub fn trick_resolution_delay(&self) -> Duration {
        Duration::from_millis(self.trick_resolution_ms)
    }

    pub fn round_restart_delay(&self) -> Duration {
        Duration::from_millis(self.round_restart_ms)
    }
}

fn default_bot_play_ms() -> u64 {
    DEFAULT_BOT_PLAY_MS
}

fn default_trick_resolution_ms() -> u64 {
    DEFAULT_TRICK_RESOLUTION_MS
}

fn default_round_restart_ms() -> u64 {
    DEFAULT_ROUND_RESTART_MS
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;
    use std::time::Duration;

    #[test]
    fn bot_delay_is_shorter_than_trick_pause_which_is_shorter_than_restart() {
        let config = EngineConfig::default();
        assert!(config.bot_play_delay() < config.trick_resolution_delay());
        assert!(config.trick_resolution_delay() < config.round_restart_delay());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"bot_play_ms": 10}"#).unwrap();
        assert_eq!(config.bot_play_delay(), Duration::from_millis(10));
        assert_eq!(
            config.round_restart_ms,
            EngineConfig::default().round_restart_ms
        );
    }
}
