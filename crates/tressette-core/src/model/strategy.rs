use crate::model::card::Card;
use crate::model::hand::Hand;

/// How a participant's hand gives up cards when a play is committed.
pub trait PlayStrategy {
    /// Removes the committed play from `hand` and returns the cards that left.
    fn discard(&self, hand: &mut Hand, committed: Card) -> Vec<Card>;

    /// Card this strategy would play on its own, if it plays without an
    /// external intent.
    fn auto_pick(&self, hand: &Hand) -> Option<Card>;
}

/// Removes every card matching the one the player chose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HumanStrategy;

impl PlayStrategy for HumanStrategy {
    fn discard(&self, hand: &mut Hand, committed: Card) -> Vec<Card> {
        hand.remove_all(committed)
    }

    fn auto_pick(&self, _hand: &Hand) -> Option<Card> {
        None
    }
}

/// Always plays the first card in hand order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotStrategy;

impl PlayStrategy for BotStrategy {
    fn discard(&self, hand: &mut Hand, _committed: Card) -> Vec<Card> {
        hand.take_first().into_iter().collect()
    }

    fn auto_pick(&self, hand: &Hand) -> Option<Card> {
        hand.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Human(HumanStrategy),
    Bot(BotStrategy),
}

impl PlayStrategy for Strategy {
    fn discard(&self, hand: &mut Hand, committed: Card) -> Vec<Card> {
        match self {
            Strategy::Human(inner) => inner.discard(hand, committed),
            Strategy::Bot(inner) => inner.discard(hand, committed),
        }
    }

    fn auto_pick(&self, hand: &Hand) -> Option<Card> {
        match self {
            Strategy::Human(inner) => inner.auto_pick(hand),
            Strategy::Bot(inner) => inner.auto_pick(hand),
        }
    }
}
