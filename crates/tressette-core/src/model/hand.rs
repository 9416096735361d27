use crate::model::card::Card;

/// Cards held by a participant, kept in the order they were dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes every copy of `card`, returning what was taken out.
    pub fn remove_all(&mut self, card: Card) -> Vec<Card> {
        let mut removed = Vec::new();
        self.cards.retain(|&c| {
            if c == card {
                removed.push(c);
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn take_first(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    pub fn first(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
