use crate::game::error::EngineError;
use crate::model::deck::Deck;
use crate::model::participant::Participant;

/// Cards handed out per batch.
pub const DEAL_BATCH: usize = 5;

/// Cards each participant holds at the start of a round.
pub fn cards_per_participant(count: usize) -> Result<usize, EngineError> {
    match count {
        2 => Ok(15),
        3 | 4 => Ok(10),
        other => Err(EngineError::UnsupportedPlayerCount(other)),
    }
}

/// Deals five cards at a time to each participant in seat order until every
/// hand holds its allotment. An exhausted deck simply stops handing out cards.
pub fn deal(deck: &mut Deck, participants: &mut [Participant]) -> Result<(), EngineError> {
    let per_participant = cards_per_participant(participants.len())?;
    let batches = per_participant / DEAL_BATCH;

    for _ in 0..batches {
        for participant in participants.iter_mut() {
            for _ in 0..DEAL_BATCH {
                if let Some(card) = deck.draw() {
                    participant.receive(card);
                }
            }
        }
    }
    Ok(())
}
