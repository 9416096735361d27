use super::engine::{RoundEngine, RoundPhase, RoundSummary};
use crate::model::board::PlayedCard;
use crate::model::participant::ParticipantView;
use serde::{Deserialize, Serialize};

/// Read-only picture of a table, detached from the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSnapshot {
    pub round_number: u32,
    pub phase: RoundPhase,
    pub current_turn: usize,
    pub turn_active: bool,
    pub participants: Vec<ParticipantView>,
    pub board: Vec<PlayedCard>,
    pub deck_remaining: usize,
    pub tricks_completed: usize,
    pub clock_ms: u64,
    pub pending_tasks: usize,
    #[serde(default)]
    pub last_round: Option<RoundSummary>,
}

impl EngineSnapshot {
    pub fn capture(engine: &RoundEngine) -> Self {
        EngineSnapshot {
            round_number: engine.round_number(),
            phase: engine.phase(),
            current_turn: engine.current_turn(),
            turn_active: engine.is_turn_active(),
            participants: engine.participants(),
            board: engine.board().to_vec(),
            deck_remaining: engine.deck_remaining(),
            tricks_completed: engine.trick_history().len(),
            clock_ms: u64::try_from(engine.now().as_millis()).unwrap_or(u64::MAX),
            pending_tasks: engine.pending_tasks().len(),
            last_round: engine.last_round_summary().cloned(),
        }
    }

    /// Cards currently held across all hands.
    pub fn cards_in_hands(&self) -> usize {
        self.participants.iter().map(|p| p.hand.len()).sum()
    }

    pub fn to_json(engine: &RoundEngine) -> serde_json::Result<String> {
        let snapshot = Self::capture(engine);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl RoundEngine {
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::EngineSnapshot;
    use crate::game::config::EngineConfig;
    use crate::game::engine::{RoundEngine, RoundPhase};
    use crate::game::roster::RosterEntry;

    fn engine() -> RoundEngine {
        RoundEngine::with_seed(
            &[RosterEntry::human("Ada"), RosterEntry::bot("Bruno")],
            EngineConfig::default(),
            99,
        )
        .unwrap()
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let json = EngineSnapshot::to_json(&engine()).unwrap();
        assert!(json.contains("\"round_number\": 1"));
        assert!(json.contains("\"state\": \"awaiting_play\""));
        assert!(json.contains("\"role\": \"bot\""));
    }

    #[test]
    fn snapshot_roundtrip_keeps_hands_and_phase() {
        let engine = engine();
        let snapshot = engine.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored = EngineSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.phase, RoundPhase::AwaitingPlay { seat: 0 });
        assert_eq!(restored.cards_in_hands(), 30);
        assert_eq!(restored.deck_remaining, 10);
    }

    #[test]
    fn snapshot_hands_are_copies() {
        let engine = engine();
        let mut snapshot = engine.snapshot();
        snapshot.participants[0].hand.clear();
        assert_eq!(engine.hand("Ada").map(|h| h.len()), Some(15));
    }
}
