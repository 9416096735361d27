use crate::model::board::{BoardState, PlayedCard};
use crate::model::card::Card;
use crate::model::participant::Participant;
use crate::model::points::Points;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Result of resolving one trick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickOutcome {
    /// Roster index of the winner, who leads the next trick.
    pub winner: usize,
    pub winner_name: String,
    pub winning_card: Card,
    pub points: Points,
    pub cards: Vec<PlayedCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    NoTrickToResolve,
    OrphanedPlay(String),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::NoTrickToResolve => write!(f, "no cards on the board to resolve"),
            TrickError::OrphanedPlay(owner) => {
                write!(f, "winning card belongs to unknown participant '{owner}'")
            }
        }
    }
}

impl std::error::Error for TrickError {}

/// Decides who takes the cards on `board`, credits them and clears the board.
///
/// Only cards of the leading suit compete; among equal strengths the earliest
/// play wins. Every card on the board counts toward the points awarded.
pub fn resolve_trick(
    board: &mut BoardState,
    participants: &mut [Participant],
) -> Result<TrickOutcome, TrickError> {
    let lead_suit = board.lead_suit().ok_or(TrickError::NoTrickToResolve)?;

    let mut best: Option<&PlayedCard> = None;
    for play in board.cards().iter().filter(|p| p.card.suit == lead_suit) {
        if best.is_none_or(|current| play.card.strength() > current.card.strength()) {
            best = Some(play);
        }
    }
    let best = best.ok_or(TrickError::NoTrickToResolve)?;
    let points: Points = board.cards().iter().map(|p| p.card.point_value()).sum();

    let winner = participants
        .iter()
        .position(|p| p.name() == best.owner)
        .ok_or_else(|| TrickError::OrphanedPlay(best.owner.clone()))?;
    let winning_card = best.card;

    let participant = &mut participants[winner];
    participant.add_points(points);
    info!(
        winner = participant.name(),
        card = %winning_card,
        points = %points,
        total = %participant.score(),
        "trick taken"
    );

    Ok(TrickOutcome {
        winner,
        winner_name: participant.name().to_string(),
        winning_card,
        points,
        cards: board.take(),
    })
}
