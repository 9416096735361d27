use crate::model::card::Card;
use crate::model::trick::TrickError;
use thiserror::Error;

/// A play the engine refused. State is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayRejection {
    #[error("no plays are accepted while a trick is being resolved")]
    TurnInactive,
    #[error("'{0}' is not seated at this table")]
    UnknownParticipant(String),
    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: String, actual: String },
    #[error("{participant} does not hold {card}")]
    CardNotInHand { participant: String, card: Card },
}

/// Faults that stop the engine: bad configuration or a broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unsupported number of players: {0} (expected 2, 3 or 4)")]
    UnsupportedPlayerCount(usize),
    #[error("participant names must not be empty")]
    EmptyName,
    #[error("participant name '{0}' is used more than once")]
    DuplicateName(String),
    #[error("trick resolution failed: {0}")]
    Trick(#[from] TrickError),
    #[error("round aborted after an earlier fault; restart the round to continue")]
    Aborted,
}
