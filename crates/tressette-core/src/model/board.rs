use crate::model::card::Card;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A card laid on the table, tagged with the name of whoever played it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub card: Card,
    pub owner: String,
}

impl PlayedCard {
    pub fn new(owner: impl Into<String>, card: Card) -> Self {
        Self {
            card,
            owner: owner.into(),
        }
    }
}

/// Cards in the trick currently being played.
#[derive(Debug, Clone)]
pub struct BoardState {
    capacity: usize,
    plays: Vec<PlayedCard>,
}

impl BoardState {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            plays: Vec::with_capacity(capacity),
        }
    }

    /// Appends a play. A full board or a second card from the same owner is
    /// refused and logged; the board is left as it was.
    pub fn add(&mut self, played: PlayedCard) -> bool {
        if self.is_full() {
            warn!(
                owner = %played.owner,
                card = %played.card,
                capacity = self.capacity,
                "refusing play on a full board"
            );
            return false;
        }
        if self.plays.iter().any(|p| p.owner == played.owner) {
            warn!(
                owner = %played.owner,
                card = %played.card,
                "refusing second play from the same owner"
            );
            return false;
        }
        self.plays.push(played);
        true
    }

    /// Whether [`add`](Self::add) would take a card from `owner` right now.
    pub fn accepts(&self, owner: &str) -> bool {
        !self.is_full() && !self.plays.iter().any(|p| p.owner == owner)
    }

    pub fn cards(&self) -> &[PlayedCard] {
        &self.plays
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.plays.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.plays.clear();
    }

    pub(crate) fn take(&mut self) -> Vec<PlayedCard> {
        std::mem::take(&mut self.plays)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardState, PlayedCard};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn plays_keep_trick_order() {
        let mut board = BoardState::new(3);
        assert!(board.add(PlayedCard::new("Ada", Card::new(Rank::Due, Suit::Coppe))));
        assert!(board.add(PlayedCard::new("Bot", Card::new(Rank::Asso, Suit::Spade))));
        assert_eq!(board.lead_suit(), Some(Suit::Coppe));
        assert_eq!(board.cards()[1].owner, "Bot");
        assert!(!board.is_full());
    }

    #[test]
    fn full_board_refuses_more_cards() {
        let mut board = BoardState::new(2);
        board.add(PlayedCard::new("Ada", Card::new(Rank::Due, Suit::Coppe)));
        board.add(PlayedCard::new("Bot", Card::new(Rank::Tre, Suit::Coppe)));
        assert!(board.is_full());
        assert!(!board.accepts("Eve"));
        assert!(!board.add(PlayedCard::new("Eve", Card::new(Rank::Re, Suit::Coppe))));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn same_owner_cannot_play_twice() {
        let mut board = BoardState::new(4);
        board.add(PlayedCard::new("Ada", Card::new(Rank::Due, Suit::Coppe)));
        assert!(!board.accepts("Ada"));
        assert!(board.accepts("Bot"));
        assert!(!board.add(PlayedCard::new("Ada", Card::new(Rank::Tre, Suit::Coppe))));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn clear_empties_the_board() {
        let mut board = BoardState::new(2);
        board.add(PlayedCard::new("Ada", Card::new(Rank::Due, Suit::Coppe)));
        board.clear();
        assert!(board.is_empty());
        assert_eq!(board.lead_suit(), None);
    }
}
